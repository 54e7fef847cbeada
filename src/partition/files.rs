use crate::protocol::types::Rank;

/// Pairs every input file with the worker that maps it.
///
/// File `i` goes to worker `1 + (i mod worker_count)`. Input order is preserved, so the
/// result is also the order in which assignments are sent.
pub fn round_robin(files: &[String], worker_count: usize) -> Vec<(Rank, String)> {
    if worker_count == 0 {
        return Vec::new();
    }

    files
        .iter()
        .enumerate()
        .map(|(idx, file)| (Rank((idx % worker_count) as u32 + 1), file.clone()))
        .collect()
}
