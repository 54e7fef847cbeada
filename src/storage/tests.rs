//! Storage Module Tests
//!
//! Validates the phase stores and their persisted formats.
//!
//! ## Test Scopes
//! - **Formats**: occurrence lists, count lists and report lines.
//! - **Backends**: the same behaviour checks run against `FsStore` and `MemoryStore`.
//! - **Layout**: `FsStore` writes the directory layout later phases and users rely on.

#[cfg(test)]
mod tests {
    use crate::protocol::types::{AggregatedCount, Rank};
    use crate::storage::format::{
        decode_occurrences, encode_counts, encode_occurrences, report_line,
    };
    use crate::storage::{FsStore, MemoryStore, Store};
    use tempfile::TempDir;

    fn fs_store(root: &TempDir) -> FsStore {
        FsStore::new(
            root.path().join("intermediary"),
            root.path().join("output"),
            root.path().join("final"),
        )
    }

    fn pair(source: &str, count: usize) -> AggregatedCount {
        AggregatedCount {
            source: source.to_string(),
            count,
        }
    }

    // ============================================================
    // FORMAT TESTS
    // ============================================================

    #[test]
    fn test_occurrence_encoding_has_trailing_separator() {
        assert_eq!(encode_occurrences("a.txt", 3), "a.txt a.txt a.txt ");
        assert_eq!(encode_occurrences("a.txt", 0), "");
    }

    #[test]
    fn test_occurrence_decoding_ignores_trailing_separator() {
        let decoded = decode_occurrences("a.txt b.txt a.txt ");
        assert_eq!(decoded, vec!["a.txt", "b.txt", "a.txt"]);
        assert!(decode_occurrences("").is_empty());
    }

    #[test]
    fn test_count_and_report_formats() {
        let counts = vec![pair("a.txt", 1), pair("b.txt", 2)];

        let encoded = encode_counts(&counts);
        assert_eq!(encoded, "(a.txt, 1) (b.txt, 2) ");
        assert_eq!(
            report_line("dog", &encoded),
            "dog --- (a.txt, 1) (b.txt, 2) \n"
        );
    }

    // ============================================================
    // SHARED BACKEND BEHAVIOUR
    // ============================================================

    async fn exercise_intermediate(store: &dyn Store) {
        store.prepare(false).await.unwrap();

        store.append_occurrences(Rank(2), "dog", "b.txt", 2).await.unwrap();
        store.append_occurrences(Rank(1), "cat", "a.txt", 1).await.unwrap();
        store.append_occurrences(Rank(1), "cat", "c.txt", 1).await.unwrap();
        store.append_occurrences(Rank(1), "cat", "a.txt", 1).await.unwrap();

        let entries = store.intermediate_entries().await.unwrap();
        assert_eq!(
            entries,
            vec![(Rank(1), "cat".to_string()), (Rank(2), "dog".to_string())]
        );

        let cat = store.read_occurrences(Rank(1), "cat").await.unwrap();
        assert_eq!(cat, vec!["a.txt", "c.txt", "a.txt"]);

        let dog = store.read_occurrences(Rank(2), "dog").await.unwrap();
        assert_eq!(dog, vec!["b.txt", "b.txt"]);

        assert!(store.read_occurrences(Rank(3), "dog").await.is_err());
    }

    async fn exercise_output_and_report(store: &dyn Store) {
        store.prepare(false).await.unwrap();

        store.append_counts("zebra", &[pair("z.txt", 4)]).await.unwrap();
        store.append_counts("dog", &[pair("a.txt", 1)]).await.unwrap();
        store.append_counts("dog", &[pair("b.txt", 2)]).await.unwrap();

        assert_eq!(store.output_words().await.unwrap(), vec!["dog", "zebra"]);
        assert_eq!(
            store.read_output("dog").await.unwrap(),
            "(a.txt, 1) (b.txt, 2) "
        );

        assert_eq!(store.read_report().await.unwrap(), "");
        store.append_report_line("dog --- x\n").await.unwrap();
        store.append_report_line("zebra --- y\n").await.unwrap();
        assert_eq!(store.read_report().await.unwrap(), "dog --- x\nzebra --- y\n");
    }

    async fn exercise_clean(store: &dyn Store) {
        store.prepare(false).await.unwrap();
        store.append_occurrences(Rank(1), "cat", "a.txt", 1).await.unwrap();
        store.append_counts("cat", &[pair("a.txt", 1)]).await.unwrap();
        store.append_report_line("cat --- (a.txt, 1) \n").await.unwrap();

        store.prepare(true).await.unwrap();

        assert!(store.intermediate_entries().await.unwrap().is_empty());
        assert!(store.output_words().await.unwrap().is_empty());
        assert_eq!(store.read_report().await.unwrap(), "");

        // Writes after a clean start from scratch
        store.append_occurrences(Rank(1), "cat", "b.txt", 1).await.unwrap();
        assert_eq!(
            store.read_occurrences(Rank(1), "cat").await.unwrap(),
            vec!["b.txt"]
        );
    }

    #[tokio::test]
    async fn test_fs_store_intermediate() {
        let root = tempfile::tempdir().unwrap();
        exercise_intermediate(&fs_store(&root)).await;
    }

    #[tokio::test]
    async fn test_memory_store_intermediate() {
        exercise_intermediate(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_fs_store_output_and_report() {
        let root = tempfile::tempdir().unwrap();
        exercise_output_and_report(&fs_store(&root)).await;
    }

    #[tokio::test]
    async fn test_memory_store_output_and_report() {
        exercise_output_and_report(&MemoryStore::new()).await;
    }

    #[tokio::test]
    async fn test_fs_store_clean() {
        let root = tempfile::tempdir().unwrap();
        exercise_clean(&fs_store(&root)).await;
    }

    #[tokio::test]
    async fn test_memory_store_clean() {
        exercise_clean(&MemoryStore::new()).await;
    }

    // ============================================================
    // FS LAYOUT TESTS
    // ============================================================

    #[tokio::test]
    async fn test_fs_store_layout() {
        let root = tempfile::tempdir().unwrap();
        let store = fs_store(&root);
        store.prepare(false).await.unwrap();

        // Rank directories appear lazily, on the first write
        assert!(!root.path().join("intermediary").join("1").exists());

        store.append_occurrences(Rank(1), "cat", "a.txt", 2).await.unwrap();
        store.append_counts("cat", &[pair("a.txt", 2)]).await.unwrap();
        store.append_report_line("cat --- (a.txt, 2) \n").await.unwrap();

        let intermediate = std::fs::read_to_string(
            root.path().join("intermediary").join("1").join("cat"),
        )
        .unwrap();
        assert_eq!(intermediate, "a.txt a.txt ");

        let output = std::fs::read_to_string(root.path().join("output").join("cat")).unwrap();
        assert_eq!(output, "(a.txt, 2) ");

        let report =
            std::fs::read_to_string(root.path().join("final").join("finalFile")).unwrap();
        assert_eq!(report, "cat --- (a.txt, 2) \n");
        assert_eq!(store.final_file(), root.path().join("final").join("finalFile"));
    }

    #[tokio::test]
    async fn test_fs_store_ignores_hidden_and_foreign_entries() {
        let root = tempfile::tempdir().unwrap();
        let store = fs_store(&root);
        store.prepare(false).await.unwrap();

        store.append_occurrences(Rank(1), "cat", "a.txt", 1).await.unwrap();
        store.append_counts("cat", &[pair("a.txt", 1)]).await.unwrap();

        std::fs::write(root.path().join("output").join(".DS_Store"), "junk").unwrap();
        std::fs::create_dir(root.path().join("intermediary").join("scratch")).unwrap();
        // Numeric names that are not the canonical spelling of a rank
        for alias in ["01", "+1", "001"] {
            let dir = root.path().join("intermediary").join(alias);
            std::fs::create_dir(&dir).unwrap();
            std::fs::write(dir.join("cat"), "stale.txt ").unwrap();
        }
        std::fs::write(
            root.path().join("intermediary").join("1").join(".hidden"),
            "junk",
        )
        .unwrap();

        assert_eq!(store.output_words().await.unwrap(), vec!["cat"]);
        assert_eq!(
            store.intermediate_entries().await.unwrap(),
            vec![(Rank(1), "cat".to_string())]
        );
    }

    #[tokio::test]
    async fn test_fs_store_alias_directory_alone_is_ignored() {
        let root = tempfile::tempdir().unwrap();
        let store = fs_store(&root);
        store.prepare(false).await.unwrap();

        std::fs::create_dir(root.path().join("intermediary").join("01")).unwrap();

        assert!(store.intermediate_entries().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_counts_entries() {
        let store = MemoryStore::new();
        store.append_occurrences(Rank(1), "cat", "a.txt", 1).await.unwrap();
        store.append_occurrences(Rank(2), "cat", "b.txt", 1).await.unwrap();
        store.append_occurrences(Rank(2), "dog", "b.txt", 1).await.unwrap();

        assert_eq!(store.intermediate_entry_count(), 3);
    }
}
