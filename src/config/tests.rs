#[cfg(test)]
mod tests {
    use crate::config::{Cli, PipelineConfig, StoreKind};
    use crate::error::ConfigError;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["distributed-wordcount", "--seed", "9"]).unwrap();
        let config = PipelineConfig::try_from(&cli).unwrap();

        assert_eq!(config.input_dir, PathBuf::from("files"));
        assert_eq!(config.intermediate_dir, PathBuf::from("intermediary"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.final_dir, PathBuf::from("final"));
        assert_eq!(config.seed, 9);
        assert_eq!(config.store, StoreKind::Fs);
        assert!(!config.clean);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "distributed-wordcount",
            "-n",
            "7",
            "--input-dir",
            "corpus",
            "--store",
            "memory",
            "--clean",
            "--summary",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.workers, 7);
        assert!(cli.summary);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.log_level(), "trace");

        let config = PipelineConfig::try_from(&cli).unwrap();
        assert_eq!(config.worker_count, 7);
        assert_eq!(config.input_dir, PathBuf::from("corpus"));
        assert_eq!(config.store, StoreKind::Memory);
        assert!(config.clean);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let cli = Cli::try_parse_from(["distributed-wordcount", "--workers", "0"]).unwrap();

        assert_eq!(PipelineConfig::try_from(&cli), Err(ConfigError::NoWorkers));
    }

    #[test]
    fn test_empty_path_rejected() {
        let mut config = PipelineConfig::rooted_at("/tmp/run", 2, 0);
        config.output_dir = PathBuf::new();

        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyPath { name: "output" })
        );
    }

    #[test]
    fn test_rooted_at_uses_default_layout() {
        let config = PipelineConfig::rooted_at("/data", 3, 5);

        assert!(config.validate().is_ok());
        assert_eq!(config.input_dir, PathBuf::from("/data/files"));
        assert_eq!(config.final_dir, PathBuf::from("/data/final"));
        assert_eq!(
            config.build_store().describe(),
            "fs(intermediate=/data/intermediary, output=/data/output, final=/data/final)"
        );
    }
}
