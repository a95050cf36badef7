use crate::api::{ApiResult, SheetHandle, TabularSink};
use log::debug;
use serde_json::Value;

/// Write `rows` starting at `start_row`, at most `batch_size` rows per call
///
/// Returns the number of write calls made.
pub async fn write_rows(
    sink: &dyn TabularSink,
    handle: &SheetHandle,
    start_row: usize,
    rows: &[Vec<Value>],
    batch_size: usize,
) -> ApiResult<usize> {
    let batch_size = batch_size.max(1);
    let mut calls = 0;

    for (index, chunk) in rows.chunks(batch_size).enumerate() {
        let row = start_row + index * batch_size;
        debug!("Writing {} rows at row {}", chunk.len(), row);
        sink.write_range(handle, row, 1, chunk).await?;
        calls += 1;
    }

    Ok(calls)
}
