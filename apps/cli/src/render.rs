use deploy_core::presentation::{
    display_symbol, format_supply, progress_bar, step_line, HEADER_LOGO, SUCCESS_BANNER,
};
use deploy_core::Settings;
use shared::{domain::DEPLOYMENT_STEPS, protocol::DeploymentReceipt};

pub const PROGRESS_WIDTH: usize = 28;

pub fn logo() -> &'static str {
    HEADER_LOGO.trim_start_matches('\n')
}

pub fn badges(settings: &Settings) -> String {
    let mut line = format!("[ {} ]", settings.network_label.to_uppercase());
    if settings.testnet_mode {
        line.push_str(" [ TESTNET MODE ]");
    }
    line
}

/// One line per revealed step, followed by the overall progress bar.
pub fn step_report(index: usize, progress_percent: u8) -> Option<String> {
    let step = DEPLOYMENT_STEPS.get(index)?;
    Some(format!(
        "{}\n  {} {progress_percent:>3}%",
        step_line(index, step, true),
        progress_bar(progress_percent, PROGRESS_WIDTH)
    ))
}

pub fn summary(receipt: &DeploymentReceipt) -> String {
    let token = &receipt.token;
    let mut lines = vec![
        SUCCESS_BANNER.to_string(),
        format!("TOKEN:     {} ({})", token.name, display_symbol(token)),
        format!("SUPPLY:    {}", format_supply(&token.total_supply)),
        format!("DECIMALS:  {}", token.decimals),
    ];
    if !token.description.trim().is_empty() {
        lines.push(format!("ABOUT:     {}", token.description.trim()));
    }
    lines.push(format!("CONTRACT:  {}", receipt.address));
    lines.push(format!(
        "DEPLOYED:  {}",
        receipt.deployed_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    lines.push(format!("EXPLORER:  {}", receipt.explorer_url));
    lines.join("\n")
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
