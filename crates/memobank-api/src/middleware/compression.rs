//! Response compression layer.

use tower_http::compression::CompressionLayer;
use tower_http::compression::predicate::SizeAbove;

/// Bodies smaller than this are sent uncompressed.
const MIN_COMPRESS_BYTES: u16 = 1024;

/// Builds a gzip compression layer for version contents and diffs.
pub fn build_compression_layer() -> CompressionLayer<SizeAbove> {
    CompressionLayer::new()
        .gzip(true)
        .compress_when(SizeAbove::new(MIN_COMPRESS_BYTES))
}
