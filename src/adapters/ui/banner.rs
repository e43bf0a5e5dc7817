//! Welcome banner: "LENT SCAN" in figlet with a purple-to-gold gradient.

use crossterm::ExecutableCommand;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{Write, stdout};

/// Strict-fast purple (#AB47BC).
pub const LENTEN_PURPLE: (u8, u8, u8) = (0xab, 0x47, 0xbc);
/// Vestment gold (#D4A843).
pub const VESTMENT_GOLD: (u8, u8, u8) = (0xd4, 0xa8, 0x43);

/// Linear interpolation between two RGB colors. `t` in [0.0, 1.0].
fn lerp_rgb(a: (u8, u8, u8), b: (u8, u8, u8), t: f64) -> (u8, u8, u8) {
    let r = (f64::from(a.0) * (1.0 - t) + f64::from(b.0) * t).round() as u8;
    let g = (f64::from(a.1) * (1.0 - t) + f64::from(b.1) * t).round() as u8;
    let bl = (f64::from(a.2) * (1.0 - t) + f64::from(b.2) * t).round() as u8;
    (r, g, bl)
}

/// Gradient color for line `i` of `total`.
fn line_color(i: usize, total: usize) -> (u8, u8, u8) {
    let t = if total <= 1 {
        1.0
    } else {
        i as f64 / (total - 1) as f64
    };
    lerp_rgb(LENTEN_PURPLE, VESTMENT_GOLD, t)
}

/// Prints the banner, then version and tagline. Falls back to plain text if the font fails.
pub fn print_welcome() {
    let mut out = stdout();
    let art = FIGfont::standard()
        .ok()
        .and_then(|font| font.convert("LENT SCAN").map(|f| f.to_string()))
        .unwrap_or_else(|| "LENT SCAN\n".to_string());
    let lines: Vec<&str> = art.lines().collect();
    let total = lines.len().max(1);

    for (i, line) in lines.iter().enumerate() {
        let (r, g, b) = line_color(i, total);
        let _ = out.execute(SetForegroundColor(Color::Rgb { r, g, b }));
        let _ = out.execute(Print(line));
        let _ = out.execute(Print("\r\n"));
        let _ = out.execute(ResetColor);
    }

    let version = env!("CARGO_PKG_VERSION");
    let _ = out.execute(SetForegroundColor(Color::Rgb {
        r: VESTMENT_GOLD.0,
        g: VESTMENT_GOLD.1,
        b: VESTMENT_GOLD.2,
    }));
    let _ = out.execute(Print(format!("v{}\r\n", version)));
    let _ = out.execute(Print("Orthodox fasting companion\r\n"));
    let _ = out.execute(ResetColor);
    let _ = out.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_endpoints() {
        assert_eq!(line_color(0, 6), LENTEN_PURPLE);
        assert_eq!(line_color(5, 6), VESTMENT_GOLD);
        assert_eq!(line_color(0, 1), VESTMENT_GOLD);
    }
}
