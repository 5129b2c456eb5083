//! Config subcommand handlers.

use dialoguer::{Input, Select};

use ablyform_core::DEFAULT_API_URL;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config::{self, Config, Profile};
use crate::error::CliError;
use crate::output;

use super::util::prompt_err;

const REDACTED: &str = "****";

// ── Helpers ─────────────────────────────────────────────────────────

fn parse_field<T: std::str::FromStr>(field: &str, value: &str, expected: &str) -> Result<T, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: field.into(),
        reason: format!("must be {expected}"),
    })
}

/// Copy of `cfg` with every plaintext token masked.
fn redacted(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.token.is_some() {
            profile.token = Some(REDACTED.into());
        }
    }
    cfg
}

fn describe(cfg: &Config) -> String {
    let mut lines = vec![
        format!("config file:     {}", config::config_path().display()),
        format!(
            "default profile: {}",
            cfg.default_profile.as_deref().unwrap_or("default")
        ),
        format!("output dir:      {}", cfg.defaults.output_dir.display()),
        format!("timeout:         {}s", cfg.defaults.timeout),
        format!("fail fast:       {}", cfg.defaults.fail_fast),
    ];

    let mut names: Vec<&String> = cfg.profiles.keys().collect();
    names.sort();
    for name in names {
        let profile = &cfg.profiles[name];
        lines.push(String::new());
        lines.push(format!("[profiles.{name}]"));
        lines.push(format!("  api_url:   {}", profile.api_url));
        if let Some(token) = &profile.token {
            lines.push(format!("  token:     {token}"));
        }
        if let Some(env) = &profile.token_env {
            lines.push(format!("  token_env: {env}"));
        }
        if let Some(timeout) = profile.timeout {
            lines.push(format!("  timeout:   {timeout}s"));
        }
    }
    lines.join("\n")
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = redacted(&config::load_config_or_default());
            let out = output::render_single(&global.output, &cfg, describe, |_| {
                config::config_path().display().to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::Set { key, value } => set(global, &key, value),

        ConfigCommand::Profiles => {
            let cfg = config::load_config_or_default();
            let default = cfg.default_profile.as_deref().unwrap_or("default");
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: ablyform config init");
            } else {
                let mut names: Vec<&String> = cfg.profiles.keys().collect();
                names.sort();
                for name in names {
                    let marker = if name == default { " *" } else { "" };
                    println!("{name}{marker}");
                }
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load_config_or_default();
            if !cfg.profiles.contains_key(&name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name,
                });
            }
            cfg.default_profile = Some(name.clone());
            config::save_config(&cfg)?;
            eprintln!("✓ Default profile set to '{name}'");
            Ok(())
        }

        ConfigCommand::SetToken { name } => {
            let cfg = config::load_config_or_default();
            let profile_name = name.unwrap_or_else(|| config::active_profile_name(global, &cfg));
            if !cfg.profiles.contains_key(&profile_name) {
                return Err(CliError::ProfileNotFound {
                    available: config::available_profiles(&cfg),
                    name: profile_name,
                });
            }

            let token = rpassword::prompt_password("Account token: ").map_err(prompt_err)?;
            if token.is_empty() {
                return Err(CliError::Validation {
                    field: "token".into(),
                    reason: "token cannot be empty".into(),
                });
            }
            config::store_token(&profile_name, &token)?;
            eprintln!("✓ Token stored in system keyring for profile '{profile_name}'");
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init() -> Result<(), CliError> {
    let config_path = config::config_path();
    eprintln!("ablyform configuration wizard");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let api_url: String = Input::new()
        .with_prompt("Control API URL")
        .default(DEFAULT_API_URL.into())
        .interact_text()
        .map_err(prompt_err)?;
    ablyform_config::parse_api_url(&api_url)?;

    let token = rpassword::prompt_password("Account token: ").map_err(prompt_err)?;
    if token.is_empty() {
        return Err(CliError::Validation {
            field: "token".into(),
            reason: "token cannot be empty".into(),
        });
    }

    let store_choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let store_selection = Select::new()
        .with_prompt("Where to store the token?")
        .items(store_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?;

    let token_field = if store_selection == 0 {
        config::store_token(&profile_name, &token)?;
        eprintln!("   ✓ Token stored in system keyring");
        None
    } else {
        Some(token)
    };

    let profile = Profile {
        api_url,
        token: token_field,
        ..Profile::default()
    };

    let mut cfg = config::load_config_or_default();
    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());

    let written = config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", written.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: ablyform apps");
    Ok(())
}

// ── Set <key> <value> ───────────────────────────────────────────────

fn set(global: &GlobalOpts, key: &str, value: String) -> Result<(), CliError> {
    let mut cfg = config::load_config_or_default();

    let scope = match key {
        "default_profile" | "default-profile" => {
            cfg.default_profile = Some(value);
            "config".to_owned()
        }
        "defaults.output_dir" | "defaults.output-dir" => {
            cfg.defaults.output_dir = value.into();
            "defaults".to_owned()
        }
        "defaults.timeout" => {
            cfg.defaults.timeout = parse_field("defaults.timeout", &value, "a number (seconds)")?;
            "defaults".to_owned()
        }
        "defaults.fail_fast" | "defaults.fail-fast" => {
            cfg.defaults.fail_fast = parse_field("defaults.fail_fast", &value, "'true' or 'false'")?;
            "defaults".to_owned()
        }
        _ => {
            let profile_name = config::active_profile_name(global, &cfg);
            let profile = cfg.profiles.entry(profile_name.clone()).or_default();
            match key {
                "api_url" | "api-url" => {
                    ablyform_config::parse_api_url(&value)?;
                    profile.api_url = value;
                }
                "token" => profile.token = Some(value),
                "token_env" | "token-env" => profile.token_env = Some(value),
                "timeout" => {
                    profile.timeout = Some(parse_field("timeout", &value, "a number (seconds)")?);
                }
                other => {
                    return Err(CliError::Validation {
                        field: other.into(),
                        reason: format!(
                            "unknown config key '{other}'. Valid keys: api_url, token, token_env, \
                             timeout, default_profile, defaults.output_dir, defaults.timeout, \
                             defaults.fail_fast"
                        ),
                    });
                }
            }
            format!("profile '{profile_name}'")
        }
    };

    config::save_config(&cfg)?;
    eprintln!("✓ Set {key} on {scope}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_masks_plaintext_tokens_only() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "prod".into(),
            Profile {
                token: Some("abc.secret".into()),
                ..Profile::default()
            },
        );
        cfg.profiles.insert(
            "ci".into(),
            Profile {
                token_env: Some("CI_TOKEN".into()),
                ..Profile::default()
            },
        );

        let shown = redacted(&cfg);
        assert_eq!(shown.profiles["prod"].token.as_deref(), Some(REDACTED));
        assert_eq!(shown.profiles["ci"].token, None);
        assert_eq!(cfg.profiles["prod"].token.as_deref(), Some("abc.secret"));
    }

    #[test]
    fn describe_never_contains_secret() {
        let mut cfg = Config::default();
        cfg.profiles.insert(
            "prod".into(),
            Profile {
                token: Some("abc.secret".into()),
                ..Profile::default()
            },
        );
        let text = describe(&redacted(&cfg));
        assert!(text.contains("[profiles.prod]"));
        assert!(!text.contains("abc.secret"));
    }

    #[test]
    fn numeric_fields_reject_garbage() {
        let err = parse_field::<u64>("timeout", "soon", "a number (seconds)").unwrap_err();
        assert!(matches!(err, CliError::Validation { ref field, .. } if field == "timeout"));
    }
}
