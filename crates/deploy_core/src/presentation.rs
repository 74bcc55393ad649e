//! Text assets and formatting shared by the desktop and terminal front ends.

use shared::domain::{DeploymentStep, TokenDraft};

pub const HEADER_LOGO: &str = r"
╔═══════════════════════════════════════════════════════════════════╗
║  ████████╗ ██████╗ ██╗  ██╗███████╗███╗   ██╗                     ║
║  ╚══██╔══╝██╔═══██╗██║ ██╔╝██╔════╝████╗  ██║                     ║
║     ██║   ██║   ██║█████╔╝ █████╗  ██╔██╗ ██║                     ║
║     ██║   ██║   ██║██╔═██╗ ██╔══╝  ██║╚██╗██║                     ║
║     ██║   ╚██████╔╝██║  ██╗███████╗██║ ╚████║                     ║
║     ╚═╝    ╚═════╝ ╚═╝  ╚═╝╚══════╝╚═╝  ╚═══╝                     ║
║  ██████╗ ███████╗██████╗ ██╗      ██████╗ ██╗   ██╗███████╗██████╗ ║
║  ██╔══██╗██╔════╝██╔══██╗██║     ██╔═══██╗╚██╗ ██╔╝██╔════╝██╔══██╗║
║  ██║  ██║█████╗  ██████╔╝██║     ██║   ██║ ╚████╔╝ █████╗  ██████╔╝║
║  ██║  ██║██╔══╝  ██╔═══╝ ██║     ██║   ██║  ╚██╔╝  ██╔══╝  ██╔══██╗║
║  ██████╔╝███████╗██║     ███████╗╚██████╔╝   ██║   ███████╗██║  ██║║
║  ╚═════╝ ╚══════╝╚═╝     ╚══════╝ ╚═════╝    ╚═╝   ╚══════╝╚═╝  ╚═╝║
╚═══════════════════════════════════════════════════════════════════╝
";

pub const DEPLOYING_BANNER: &str = "\
╔══════════════════════╗
║   DEPLOYING TOKEN    ║
║   ▓▓▓▓▓▓░░░░░░░░░    ║
╚══════════════════════╝";

pub const SUCCESS_BANNER: &str = "\
╔══════════════════════╗
║   ✓ DEPLOY SUCCESS   ║
║   ████████████████   ║
╚══════════════════════╝";

pub const FORM_TITLE: &str = "token_config.sol";
pub const SEQUENCE_TITLE: &str = "deployment_sequence.sh";
pub const FOOTER_CREDITS: &str = "Requested by @sat_org · Built by @clonkbot";

pub fn deploy_button_label(valid: bool) -> &'static str {
    if valid {
        "[ INITIALIZE DEPLOYMENT SEQUENCE ]"
    } else {
        "[ FILL REQUIRED FIELDS ]"
    }
}

pub fn step_marker(revealed: bool) -> &'static str {
    if revealed {
        "✓"
    } else {
        "○"
    }
}

/// `✓ [03] Estimating gas requirements...`
pub fn step_line(index: usize, step: &DeploymentStep, revealed: bool) -> String {
    format!("{} [{index:02}] {}", step_marker(revealed), step.label)
}

/// Groups the integer part of a plain decimal string with commas. Anything
/// that is not a plain decimal number is returned trimmed but otherwise as-is.
pub fn format_supply(raw: &str) -> String {
    let raw = raw.trim();
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (raw, None),
    };
    let is_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !is_digits(int_part) || frac_part.is_some_and(|f| !is_digits(f)) {
        return raw.to_string();
    }

    let int_part = int_part.trim_start_matches('0');
    let int_part = if int_part.is_empty() { "0" } else { int_part };
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    match frac_part {
        Some(frac) => format!("{grouped}.{frac}"),
        None => grouped,
    }
}

pub fn display_symbol(draft: &TokenDraft) -> String {
    format!("${}", draft.symbol)
}

pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!("{}{}", "▓".repeat(filled), "░".repeat(width - filled))
}
