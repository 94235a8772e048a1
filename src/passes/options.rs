//! Command line surface for the pass pipeline, meant to be `#[command(flatten)]`ed
//! into a driver's argument struct.

use super::manager::PassPipelineConfig;

#[derive(Debug, Clone, Default, clap::Args)]
pub struct PassManagerOptions {
    /// Disable the named GIL pass
    #[arg(long = "disable-gil-pass", value_name = "pass-name")]
    pub disable_passes: Vec<String>,

    /// Re-enable a GIL pass that is disabled by default
    #[arg(long = "enable-gil-pass", value_name = "pass-name")]
    pub enable_passes: Vec<String>,

    /// Print the module before the named GIL pass runs
    #[arg(long = "print-gil-before-pass", value_name = "pass-name")]
    pub print_before_passes: Vec<String>,

    /// Print the module after the named GIL pass runs
    #[arg(long = "print-gil-after-pass", value_name = "pass-name")]
    pub print_after_passes: Vec<String>,

    /// Print the module before every GIL pass
    #[arg(long = "print-gil-before-all")]
    pub print_before_all: bool,

    /// Print the module after every GIL pass
    #[arg(long = "print-gil-after-all")]
    pub print_after_all: bool,
}

impl PassManagerOptions {
    /// Resolves the flags into a pipeline configuration. Enables win over
    /// disables when both name the same pass; names that match no registered
    /// pass are ignored.
    pub fn pipeline_config(&self) -> PassPipelineConfig {
        let mut config = PassPipelineConfig::default();

        for name in &self.disable_passes {
            config.disable_pass(name);
        }
        for name in &self.enable_passes {
            config.enable_pass(name);
        }

        if self.print_before_all {
            config.print_before_all();
        }
        if self.print_after_all {
            config.print_after_all();
        }
        for name in &self.print_before_passes {
            config.print_before(name);
        }
        for name in &self.print_after_passes {
            config.print_after(name);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::PassManagerOptions;
    use crate::passes::PassKind;

    #[derive(Parser)]
    struct Cli {
        #[command(flatten)]
        passes: PassManagerOptions,
    }

    #[test]
    fn flags_map_onto_the_pipeline_config() {
        let cli = Cli::parse_from([
            "gluc",
            "--disable-gil-pass",
            "dead-code-elimination",
            "--print-gil-before-pass",
            "void-main",
            "--print-gil-after-all",
        ]);

        let config = cli.passes.pipeline_config();
        let by_kind = |kind| {
            config
                .passes()
                .iter()
                .find(|p| p.kind == kind)
                .unwrap()
                .clone()
        };

        let dce = by_kind(PassKind::DeadCodeElimination);
        assert!(!dce.enabled);
        assert!(dce.print_after);

        let void_main = by_kind(PassKind::VoidMain);
        assert!(void_main.enabled);
        assert!(void_main.print_before);
        assert!(void_main.print_after);

        let check = by_kind(PassKind::TerminatorCheck);
        assert!(!check.print_before);
    }

    #[test]
    fn enables_win_over_disables() {
        let options = PassManagerOptions {
            disable_passes: vec!["void-main".into()],
            enable_passes: vec!["void-main".into()],
            ..Default::default()
        };

        let config = options.pipeline_config();
        let void_main = config
            .passes()
            .iter()
            .find(|p| p.kind == PassKind::VoidMain)
            .unwrap();
        assert!(void_main.enabled);
    }

    #[test]
    fn no_flags_means_the_default_pipeline() {
        let options = PassManagerOptions::default();
        let config = options.pipeline_config();

        assert_eq!(config.passes().len(), 4);
        assert!(config.passes().iter().all(|p| p.enabled));
        assert!(config.passes().iter().all(|p| !p.print_before && !p.print_after));
    }
}
