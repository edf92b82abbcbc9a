use chrono::{Local, TimeZone};
use config_manager::DisplayConfig;
use std::fmt::{self, Write};
use wallet_core::{format_amount, format_timestamp_in, truncate_address, NumberFormat, WalletView};

const LABEL_WIDTH: usize = 10;

/// Plain-text rendering of a [`WalletView`]: header, balance card and one
/// block per transaction.
pub struct TextRenderer<Tz: TimeZone = Local> {
    display: DisplayConfig,
    number_format: NumberFormat,
    tz: Tz,
}

impl TextRenderer<Local> {
    pub fn new(display: DisplayConfig) -> Self {
        Self::with_timezone(display, Local)
    }
}

impl<Tz> TextRenderer<Tz>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    pub fn with_timezone(display: DisplayConfig, tz: Tz) -> Self {
        let number_format = display.number_format();
        Self {
            display,
            number_format,
            tz,
        }
    }

    pub fn render(&self, view: &WalletView) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_view(&mut out, view);
        out
    }

    fn write_view(&self, out: &mut String, view: &WalletView) -> fmt::Result {
        writeln!(out, "{}", view.address)?;
        writeln!(out)?;
        writeln!(
            out,
            "{:<width$}{}",
            "Available",
            format_amount(view.balance.available, &self.number_format),
            width = LABEL_WIDTH
        )?;
        writeln!(
            out,
            "{:<width$}{}",
            "Locked",
            format_amount(view.balance.locked, &self.number_format),
            width = LABEL_WIDTH
        )?;
        writeln!(out)?;
        writeln!(out, "Last 10 Transactions")?;

        if view.transactions.is_empty() {
            writeln!(out, "  (none)")?;
        }

        for tx in &view.transactions {
            writeln!(out, "{} {}", tx.icon, tx.title)?;
            writeln!(
                out,
                "   From: {}  To: {}  {}",
                self.truncate(tx.sender.as_deref()),
                self.truncate(tx.recipient.as_deref()),
                format_timestamp_in(tx.timestamp, &self.tz, &self.display.timestamp_format)
            )?;
        }
        Ok(())
    }

    fn truncate(&self, addr: Option<&str>) -> String {
        truncate_address(
            addr,
            self.display.address_head_len,
            self.display.address_tail_len,
        )
    }
}
