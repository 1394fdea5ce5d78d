use std::io::Read;

use flate2::bufread::GzDecoder;

/// Two leading bytes of a gzip stream, read as a little-endian u16.
pub const GZIP_MAGIC: u16 = 0x8B1F;

/// Inflate every gzip member in `data`, skipping zero padding after each member.
pub fn decompress_gzip(mut data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut output = Vec::new();
    loop {
        let padding = data.iter().take_while(|&&b| b == 0).count();
        data = &data[padding..];
        if data.is_empty() {
            break;
        }

        // the bufread decoder stops right after the member trailer
        let mut decoder = GzDecoder::new(data);
        decoder.read_to_end(&mut output)?;
        data = decoder.into_inner();
    }

    Ok(output)
}
