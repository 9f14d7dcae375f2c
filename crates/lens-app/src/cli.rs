use clap::Parser;
use lens_config::Config;
use lens_types::{CaptureRegion, OcrLanguage};

#[derive(Debug, Parser)]
#[command(name = "lens", version, about = "Live translation of a screen region")]
pub struct Cli {
    /// Profile to load from the config directory
    #[arg(long, default_value = "main")]
    pub profile: String,

    /// Initial capture region as X,Y,WIDTH,HEIGHT; starts monitoring
    #[arg(long, allow_hyphen_values = true)]
    pub region: Option<CaptureRegion>,

    /// Recognition language (eng, chi_sim, chi_tra, jpn, kor)
    #[arg(long)]
    pub src: Option<OcrLanguage>,

    /// Translation target language
    #[arg(long)]
    pub dest: Option<OcrLanguage>,

    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// google, deepl or youdao
    #[arg(long)]
    pub provider: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Command-line values win over profile and environment
    pub fn apply(&self, config: &mut Config) {
        if let Some(region) = self.region {
            config.ocr.capture_region = Some(region);
        }
        if let Some(src) = self.src {
            config.ocr.language = src;
        }
        if let Some(dest) = self.dest {
            config.translator.target_language = dest;
        }
        if let Some(ms) = self.interval_ms {
            config.pipeline.tick_interval_ms = ms;
        }
        if let Some(provider) = &self.provider {
            config.translator.provider = provider.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_apply() {
        let cli = Cli::try_parse_from([
            "lens",
            "--profile",
            "manga",
            "--region",
            "-1920,40,300,80",
            "--src",
            "jpn",
            "--dest",
            "eng",
            "--interval-ms",
            "250",
            "--provider",
            "deepl",
        ])
        .unwrap();
        assert_eq!(cli.profile, "manga");

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.ocr.capture_region, Some(CaptureRegion::new(-1920, 40, 300, 80)));
        assert_eq!(config.ocr.language, OcrLanguage::Japanese);
        assert_eq!(config.translator.target_language, OcrLanguage::English);
        assert_eq!(config.pipeline.tick_interval_ms, 250);
        assert_eq!(config.translator.provider, "deepl");
    }

    #[test]
    fn test_defaults_leave_config_alone() {
        let cli = Cli::try_parse_from(["lens"]).unwrap();
        assert_eq!(cli.profile, "main");
        assert!(!cli.json);

        let mut config = Config::default();
        cli.apply(&mut config);
        assert_eq!(config.ocr.capture_region, None);
        assert_eq!(config.translator.provider, "google");
    }

    #[test]
    fn test_rejects_unsupported_language() {
        assert!(Cli::try_parse_from(["lens", "--src", "fra"]).is_err());
        assert!(Cli::try_parse_from(["lens", "--region", "1,2,3"]).is_err());
    }
}
