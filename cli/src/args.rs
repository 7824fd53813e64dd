use clap::Parser;

use crate::scenario::Scenario;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Sample admin token used when none is given.
pub const DEFAULT_TOKEN: &str = concat!(
    "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.",
    "eyJpZCI6IjY4Y2EwZTM2M2M3N2M4MmI5ZmM1MWVlNyIsImVtYWlsIjoiMzIyMDE0NTkzMUBxcS5jb20iLCJuYW1lIjoic3VpbGV5YW4iLCJpYXQiOjE3NTkxMTc4MTEs",
    "ImV4cCI6MTc2MTcwOTgxMSwiaXNzIjoic3Vpa25pdC1hcGkifQ._AoKaEAxk91La6INH50giSbnXL-5lZpAEY_GaVrY9t8",
);

/// Smoke-test the Suiknit API and print every response.
///
/// Registration and login are skipped (captcha). The token should carry
/// admin privileges.
#[derive(Clone, Debug, Parser)]
#[command(name = "suiknit-probe", version = env!("CARGO_PKG_VERSION"), about, long_about = None)]
pub struct Args {
    /// API base URL
    #[arg(long, env = "SUIKNIT_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// JWT token with admin privileges
    #[arg(
        long,
        env = "SUIKNIT_TOKEN",
        default_value = DEFAULT_TOKEN,
        hide_default_value = true,
        hide_env_values = true
    )]
    pub token: String,

    /// Optional fileId to test file endpoints
    #[arg(long, env = "SUIKNIT_FILE_ID")]
    pub file_id: Option<String>,

    /// Try common base URLs if the provided one fails
    #[arg(long)]
    pub auto_detect: bool,
}

impl Args {
    pub fn scenario(&self) -> Scenario {
        Scenario {
            base_url: self.base_url.clone(),
            file_id: self.file_id.clone(),
            auto_detect: self.auto_detect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_flags() {
        let args = Args::try_parse_from(["suiknit-probe"]).unwrap();
        assert_eq!(args.base_url, DEFAULT_BASE_URL);
        assert_eq!(args.token, DEFAULT_TOKEN);
        assert!(args.file_id.is_none());
        assert!(!args.auto_detect);
    }

    #[test]
    fn flags_override_defaults() {
        let args = Args::try_parse_from([
            "suiknit-probe",
            "--base-url",
            "http://127.0.0.1:4000/",
            "--token",
            "t",
            "--file-id",
            "abc123",
            "--auto-detect",
        ])
        .unwrap();
        let scenario = args.scenario();
        assert_eq!(scenario.base_url, "http://127.0.0.1:4000/");
        assert_eq!(scenario.file_id.as_deref(), Some("abc123"));
        assert!(scenario.auto_detect);
        assert_eq!(args.token, "t");
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
