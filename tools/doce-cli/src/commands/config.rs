//! Configuration management commands.

use std::path::PathBuf;

use anyhow::{bail, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::context::{Context, CONFIG_NAMES};

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Init { force, format } => {
            init_config(force, &format, ctx).await.map(|_| ())
        }
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    let storefront = &ctx.config.storefront;

    ctx.output.info("[storefront]");
    ctx.output.kv("store_name", &storefront.store_name);
    ctx.output.kv("whatsapp_phone", &storefront.whatsapp_phone);
    ctx.output.kv("pix_key", &storefront.pix_key);
    ctx.output.kv("pix_qr_image", &storefront.pix_qr_image);
    ctx.output.kv("storage_key", &storefront.storage_key);
    ctx.output.kv(
        "location_timeout_ms",
        &storefront.location_timeout_ms.to_string(),
    );
    ctx.output
        .kv("notice_delay_ms", &storefront.notice_delay_ms.to_string());
    ctx.output.kv("maps_base_url", &storefront.maps_base_url);

    ctx.output.info("");
    ctx.output.info("[storage]");
    ctx.output.kv("dir", &ctx.storage_dir().display().to_string());

    ctx.output.info("");
    match &ctx.config.catalog {
        Some(path) => ctx.output.kv("catalog", path),
        None => ctx.output.kv("catalog", "(built-in)"),
    }

    Ok(())
}

async fn init_config(force: bool, format: &str, ctx: &Context) -> Result<PathBuf> {
    let name = if format == "json" {
        CONFIG_NAMES[2]
    } else {
        CONFIG_NAMES[0]
    };
    let config_path = ctx.cwd.join(name);

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    ctx.config.save(&config_path)?;

    ctx.output
        .success(&format!("Created: {}", config_path.display()));

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use crate::output::Output;

    fn context(dir: &std::path::Path, config: CliConfig) -> Context {
        Context {
            config,
            output: Output::new(false, true),
            cwd: dir.to_path_buf(),
            carried_cart: None,
        }
    }

    #[tokio::test]
    async fn test_init_writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = CliConfig::default();
        config.storefront.store_name = "Doces da Vó".to_string();
        let ctx = context(dir.path(), config);

        for format in ["toml", "json"] {
            let path = init_config(false, format, &ctx).await.unwrap();
            let loaded = CliConfig::load(&path).unwrap();
            assert_eq!(loaded.storefront.store_name, "Doces da Vó");
            assert_eq!(loaded.storage.dir, ".doce");
        }
        assert!(dir.path().join("doce.toml").exists());
        assert!(dir.path().join("doce.json").exists());
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path(), CliConfig::default());

        init_config(false, "toml", &ctx).await.unwrap();
        assert!(init_config(false, "toml", &ctx).await.is_err());
        assert!(init_config(true, "toml", &ctx).await.is_ok());
    }
}
