//! PIX payment details.

use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;
use base64::Engine;
use console::Term;
use doce_commerce::checkout::{copy_pix_key, Clipboard, ClipboardError, PixDetails};
use doce_commerce::notice::TransientNotice;

use super::PixArgs;
use crate::context::Context;

/// Terminal clipboard via the OSC 52 escape sequence.
struct TerminalClipboard {
    term: Term,
}

#[async_trait]
impl Clipboard for TerminalClipboard {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        if !self.term.is_term() {
            return Err(ClipboardError("stdout is not a terminal".to_string()));
        }
        let encoded = base64::engine::general_purpose::STANDARD.encode(text);
        let mut term = self.term.clone();
        write!(term, "\x1b]52;c;{}\x07", encoded)
            .and_then(|()| term.flush())
            .map_err(|e| ClipboardError(e.to_string()))
    }
}

/// Run the pix command.
pub async fn run(args: PixArgs, ctx: &Context) -> Result<()> {
    let pix = PixDetails::from_config(&ctx.config.storefront);

    if ctx.output.is_json() {
        ctx.output.json(&pix);
        return Ok(());
    }

    ctx.output.header("Pagamento via PIX");
    ctx.output.kv("Chave", &pix.key);
    ctx.output.kv("QR Code", &pix.qr_image);

    if args.copy {
        let notice = TransientNotice::new(ctx.config.storefront.notice_delay());
        let clipboard = TerminalClipboard {
            term: Term::stdout(),
        };
        if copy_pix_key(&clipboard, &pix, &notice).await {
            if let Some(message) = notice.current() {
                ctx.output.success(&message);
            }
        } else {
            ctx.output
                .warn("Could not copy the key; select it above instead.");
        }
    }

    Ok(())
}
