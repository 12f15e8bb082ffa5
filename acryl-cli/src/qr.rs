//! Terminal QR codes for addresses.

use qrcode::{Color, QrCode};

/// Blank modules around the code.
const QUIET_ZONE: usize = 2;

/// Render `data` as a QR code using half-block characters, two module rows
/// per terminal line.
pub fn render(data: &str) -> Result<String, qrcode::types::QrError> {
    let code = QrCode::new(data)?;
    let width = code.width();
    let colors = code.to_colors();
    let size = width + QUIET_ZONE * 2;

    let dark = |x: usize, y: usize| {
        let inside = |v: usize| (QUIET_ZONE..QUIET_ZONE + width).contains(&v);
        inside(x) && inside(y) && colors[(y - QUIET_ZONE) * width + (x - QUIET_ZONE)] == Color::Dark
    };

    let mut out = String::new();
    for y in (0..size).step_by(2) {
        out.push_str("      ");
        for x in 0..size {
            out.push(match (dark(x, y), dark(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            });
        }
        out.push('\n');
    }
    Ok(out)
}

/// Print the QR code for `data`, or a warning if it cannot be encoded.
pub fn render_to_terminal(data: &str) {
    match render(data) {
        Ok(code) => println!("\n{code}"),
        Err(e) => eprintln!("Failed to generate QR code: {e}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_address() {
        let data = "3EXZoKW6FXoN3Y9fmGsGCPkttJSWaKUPmfN";
        let size = QrCode::new(data).unwrap().width() + 2 * QUIET_ZONE;

        let out = render(data).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), (size + 1) / 2);
        assert!(lines.iter().all(|l| l.chars().count() == 6 + size));
        assert!(out.contains('█'));
    }
}
