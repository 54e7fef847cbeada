//! Protocol Module Tests
//!
//! ## Test Scopes
//! - **Tags**: message-to-tag mapping, numeric discriminators and direction.
//! - **Letter ranges**: ownership of words by leading character.
//! - **Serialization**: envelopes survive a JSON trip.

#[cfg(test)]
mod tests {
    use crate::protocol::types::{
        AggregatedCount, Direction, Envelope, LetterRange, Message, Rank, Tag,
    };

    // ============================================================
    // TAG TESTS
    // ============================================================

    #[test]
    fn test_message_tags() {
        assert_eq!(Message::FileName("a.txt".into()).tag(), Tag::FileName);
        assert_eq!(Message::EndOfFiles.tag(), Tag::EndOfFiles);
        assert_eq!(Message::EndOfMapping { rank: Rank(2) }.tag(), Tag::EndOfMapping);
        assert_eq!(
            Message::StartReducing(LetterRange::default()).tag(),
            Tag::StartReducing
        );
        assert_eq!(Message::EndOfReducing { rank: Rank(1) }.tag(), Tag::EndOfReducing);
        assert_eq!(Message::CreateFinalFile.tag(), Tag::CreateFinalFile);
    }

    #[test]
    fn test_tag_discriminators_are_stable() {
        assert_eq!(Tag::FileName as u8, 0);
        assert_eq!(Tag::EndOfFiles as u8, 1);
        assert_eq!(Tag::EndOfMapping as u8, 2);
        assert_eq!(Tag::StartReducing as u8, 3);
        assert_eq!(Tag::EndOfReducing as u8, 4);
        assert_eq!(Tag::CreateFinalFile as u8, 5);
    }

    #[test]
    fn test_only_acknowledgments_flow_to_coordinator() {
        let upstream: Vec<Tag> = [
            Tag::FileName,
            Tag::EndOfFiles,
            Tag::EndOfMapping,
            Tag::StartReducing,
            Tag::EndOfReducing,
            Tag::CreateFinalFile,
        ]
        .into_iter()
        .filter(|tag| tag.direction() == Direction::ToCoordinator)
        .collect();

        assert_eq!(upstream, vec![Tag::EndOfMapping, Tag::EndOfReducing]);
    }

    // ============================================================
    // RANK TESTS
    // ============================================================

    #[test]
    fn test_worker_ranks_start_at_one() {
        let ranks: Vec<Rank> = Rank::workers(3).collect();
        assert_eq!(ranks, vec![Rank(1), Rank(2), Rank(3)]);

        assert!(!Rank::COORDINATOR.is_worker_of(3));
        assert!(Rank(3).is_worker_of(3));
        assert!(!Rank(4).is_worker_of(3));
        assert_eq!(Rank::FINALIZER, Rank(1));
    }

    // ============================================================
    // LETTER RANGE TESTS
    // ============================================================

    #[test]
    fn test_letter_range_owns_by_leading_letter() {
        let range = LetterRange::new(['c', 'q'], false);

        assert!(range.owns("cat"));
        assert!(range.owns("quiet"));
        assert!(!range.owns("dog"));
        assert!(!range.owns(""));
    }

    #[test]
    fn test_overflow_range_owns_non_ascii_words() {
        let plain = LetterRange::new(['e'], false);
        let overflow = LetterRange::new(['z'], true);

        assert!(!plain.owns("élan"));
        assert!(overflow.owns("élan"));
        assert!(overflow.owns("_init"));
        // Overflow does not widen the letter set itself
        assert!(!overflow.owns("elan"));
    }

    #[test]
    fn test_letter_range_display() {
        assert_eq!(LetterRange::new(['b', 'a'], false).to_string(), "[ab]");
        assert_eq!(LetterRange::new(['x'], true).to_string(), "[x+]");
    }

    #[test]
    fn test_aggregated_count_format() {
        let pair = AggregatedCount {
            source: "a.txt".to_string(),
            count: 2,
        };
        assert_eq!(pair.to_string(), "(a.txt, 2) ");
    }

    // ============================================================
    // SERIALIZATION TESTS
    // ============================================================

    #[test]
    fn test_envelope_serialization() {
        let envelope = Envelope {
            from: Rank::COORDINATOR,
            to: Rank(2),
            message: Message::StartReducing(LetterRange::new(['a', 'b'], true)),
        };

        let json = serde_json::to_string(&envelope).expect("Serialization failed");
        let restored: Envelope = serde_json::from_str(&json).expect("Deserialization failed");

        assert_eq!(restored, envelope);
        assert_eq!(restored.message.tag(), Tag::StartReducing);
    }
}
