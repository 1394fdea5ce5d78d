use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use monkey_pak_core::extract::{ExtractEvent, PackExtractBuilder};
use monkey_pak_core::pack::{ArchiveVariant, VariantTable};

use crate::{ArchiveArgs, ExtractCommand, ListCommand};

fn dictionary_dir(args: &ArchiveArgs) -> anyhow::Result<PathBuf> {
    if let Some(dir) = &args.dictionary_dir {
        return Ok(dir.clone());
    }
    let exe = std::env::current_exe().context("Failed to locate the executable")?;
    let exe_dir = exe.parent().map(|p| p.to_path_buf()).unwrap_or_default();
    Ok(exe_dir.join("assets").join("hashmap"))
}

fn builder(args: &ArchiveArgs) -> anyhow::Result<PackExtractBuilder> {
    let variant: ArchiveVariant = args.variant.parse()?;
    let table = VariantTable::with_dictionary_dir(dictionary_dir(args)?);

    let mut builder = PackExtractBuilder::new(variant, &table);
    if let Some(index) = &args.index {
        builder = builder.index(index);
    }
    if let Some(payload) = &args.payload {
        builder = builder.payload(payload);
    }
    if let Some(dictionary) = &args.dictionary {
        builder = builder.dictionary(dictionary);
    }
    if let Some(wordlist) = &args.wordlist {
        builder = builder.wordlist(wordlist);
    }

    let config = builder.config();
    builder.check_inputs().with_context(|| {
        format!(
            "Place the {} archive at `{}` and `{}`, or pass --index and --payload",
            variant,
            config.index_file.display(),
            config.payload_file.display()
        )
    })?;

    Ok(builder)
}

pub fn extract(cmd: &ExtractCommand) -> anyhow::Result<()> {
    let mut builder = builder(&cmd.archive)?;
    if let Some(output) = &cmd.output {
        builder = builder.output_dir(output);
    }

    let bar = ProgressBar::new(0);
    bar.set_style(
        ProgressStyle::default_bar().template("{pos}/{len} files written {wide_bar} elapsed: {elapsed} eta: {eta}")?,
    );
    let bar1 = bar.clone();
    let builder = builder.on_event(move |event| match event {
        ExtractEvent::Start { total } => {
            bar1.set_length(total as u64);
            bar1.enable_steady_tick(Duration::from_millis(100));
        }
        ExtractEvent::FileDone { .. } => bar1.inc(1),
        ExtractEvent::Finish { .. } => bar1.finish(),
    });

    let report = builder.run().context("Extraction failed")?;
    bar.finish_and_clear();

    println!(
        "Extracted {} of {} entries to `{}` ({} names resolved, {} new)",
        report.extracted,
        report.entries,
        report.output_dir.display(),
        report.resolved.total(),
        report.newly_named
    );
    println!("Hash dictionary saved to `{}`", report.dictionary_path.display());
    println!("Done.");

    Ok(())
}

pub fn list(cmd: &ListCommand) -> anyhow::Result<()> {
    let builder = builder(&cmd.archive)?;
    let scanned = builder.scan().context("Failed to read archive")?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&scanned.entries)?);
    } else {
        for entry in &scanned.entries {
            println!("{}", entry);
        }
    }

    Ok(())
}
