mod common;

use common::shipped_tables;
use proptest::prelude::*;
use std::io::Cursor;
use univkbd::convert::convert_keyboard_to_country;
use univkbd::key::{Key, KeyType};
use univkbd::layouts::{CharMap, LogicalLayout};
use univkbd::platform::LoadedLayout;
use univkbd::Keyboard;

// --- STRATEGIES ---

fn arb_control_type() -> impl Strategy<Value = KeyType> {
    proptest::sample::select(vec![
        KeyType::Shift,
        KeyType::Alt,
        KeyType::Ctrl,
        KeyType::Esc,
        KeyType::Tab,
        KeyType::Backspace,
        KeyType::Space,
        KeyType::Enter,
        KeyType::CapsLock,
        KeyType::Up,
        KeyType::Fn7,
        KeyType::OpenClose,
    ])
}

prop_compose! {
    fn arb_regular()(
        chars in "\\PC{0,4}",
        x_span in 0.5..5.25f32,
        y_span in 0.5..2.0f32
    ) -> Key {
        Key::regular(chars, x_span, y_span)
    }
}

prop_compose! {
    fn arb_control()(
        key_type in arb_control_type(),
        x_span in 0.5..5.25f32
    ) -> Key {
        Key::control(key_type, x_span, 1.0)
    }
}

fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![3 => arb_regular(), 1 => arb_control()]
}

prop_compose! {
    fn arb_rows()(
        rows in proptest::collection::vec(proptest::collection::vec(arb_key(), 0..15), 0..7)
    ) -> Vec<Vec<Key>> {
        rows
    }
}

prop_compose! {
    fn arb_permutation()(
        letters in Just(('a'..='z').collect::<Vec<char>>()).prop_shuffle()
    ) -> String {
        letters.into_iter().collect()
    }
}

fn arb_letter_rows() -> impl Strategy<Value = Vec<Vec<Key>>> {
    proptest::collection::vec(
        proptest::collection::vec("[a-zA-Z0-9]{1,3}".prop_map(|s| Key::regular(s, 1.0, 1.0)), 1..12),
        1..5,
    )
}

proptest! {
    #[test]
    fn prop_serialization_round_trip(rows in arb_rows()) {
        let keyboard = Keyboard::from_rows(rows);
        let mut bytes = Vec::new();
        keyboard.serialize(&mut bytes).unwrap();

        let mut cursor = Cursor::new(&bytes);
        let back = Keyboard::deserialize(&mut cursor).unwrap();
        prop_assert_eq!(&back, &keyboard);
        prop_assert_eq!(cursor.position() as usize, bytes.len());
    }

    #[test]
    fn prop_placement_follows_spans(rows in arb_rows()) {
        let keyboard = Keyboard::from_rows(rows.clone());
        let mut keys = keyboard.keys().iter();
        for (row_idx, row) in rows.iter().enumerate() {
            let mut x = 0.0f32;
            for original in row {
                let placed = keys.next().unwrap();
                prop_assert_eq!(placed.y(), row_idx as f32);
                prop_assert_eq!(placed.x(), x);
                x += original.x_span();
            }
        }
        prop_assert!(keys.next().is_none());
    }

    #[test]
    fn prop_remap_involution(rows in arb_letter_rows(), a in arb_permutation(), b in arb_permutation()) {
        let keyboard = Keyboard::from_rows(rows);
        let there = keyboard.convert_layout(&a, &b).unwrap();
        let back = there.convert_layout(&b, &a).unwrap();
        prop_assert_eq!(back, keyboard);
    }

    #[test]
    fn prop_remap_preserves_geometry_and_controls(rows in arb_rows(), b in arb_permutation()) {
        let keyboard = Keyboard::from_rows(rows);
        let map = CharMap::between(LogicalLayout::Azerty.get_str(), &b).unwrap();
        let converted = keyboard.convert_layout_with(&map);

        prop_assert_eq!(converted.len(), keyboard.len());
        for (before, after) in keyboard.keys().iter().zip(converted.keys()) {
            prop_assert_eq!(before.key_type(), after.key_type());
            prop_assert_eq!((before.x(), before.y()), (after.x(), after.y()));
            prop_assert_eq!((before.x_span(), before.y_span()), (after.x_span(), after.y_span()));
            if !before.is_regular() {
                prop_assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn prop_label_clamps(chars in "\\PC{1,5}", extra in 0usize..10) {
        let key = Key::regular(chars, 1.0, 1.0);
        let last = key.levels() - 1;
        prop_assert_eq!(key.label(last + extra), key.label(last));
    }

    #[test]
    fn prop_country_conversion_never_adds_keys(rows in arb_rows()) {
        let provider = shipped_tables();
        let fr = LoadedLayout::load(&provider, "French").unwrap();
        let us = LoadedLayout::load(&provider, "US").unwrap();

        let conversion = convert_keyboard_to_country(&provider, fr.handle(), us.handle(), &rows, true);
        let before: usize = rows.iter().map(Vec::len).sum();
        prop_assert!(conversion.key_count() <= before);
        prop_assert_eq!(conversion.key_count() + conversion.skipped.len(), before);
        prop_assert_eq!(conversion.rows.len(), rows.len());
    }
}
