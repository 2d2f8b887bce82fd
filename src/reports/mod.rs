use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use univkbd::convert::SkippedKey;
use univkbd::{Key, Keyboard};

/// Shift glyph over base glyph, the way keycaps are printed.
fn keycap(key: &Key) -> String {
    if key.is_regular() && key.levels() > 1 {
        format!("{}\n{}", key.label(1), key.label(0))
    } else {
        key.label(0)
    }
}

pub fn print_keyboard_grid(name: &str, keyboard: &Keyboard) {
    println!("\nKeyboard: {} ({} keys)", name, keyboard.len());
    if keyboard.is_empty() {
        return;
    }

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for row in keyboard.rows() {
        let cells: Vec<Cell> = row
            .iter()
            .map(|key| {
                let cell = Cell::new(keycap(key)).set_alignment(CellAlignment::Center);
                if key.is_regular() {
                    cell
                } else {
                    cell.fg(Color::DarkGrey)
                }
            })
            .collect();
        table.add_row(cells);
    }
    println!("{}", table);
}

pub fn print_skipped_report(skipped: &[SkippedKey]) {
    if skipped.is_empty() {
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Row").add_attribute(Attribute::Bold),
        Cell::new("Col").add_attribute(Attribute::Bold),
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Dropped because").fg(Color::Red),
    ]);

    for s in skipped {
        table.add_row(vec![
            Cell::new(s.row),
            Cell::new(s.column),
            Cell::new(&s.characters),
            Cell::new(s.reason.to_string()),
        ]);
    }
    println!("\n{}", table);
}

#[cfg(test)]
mod tests {
    use super::*;
    use univkbd::KeyType;

    #[test]
    fn test_keycap_stacks_shift_over_base() {
        assert_eq!(keycap(&Key::regular("aA", 1.0, 1.0)), "A\na");
        assert_eq!(keycap(&Key::regular("²", 1.0, 1.0)), "²");
        assert_eq!(keycap(&Key::control(KeyType::CapsLock, 1.75, 1.0)), "Caps Lock");
    }
}
