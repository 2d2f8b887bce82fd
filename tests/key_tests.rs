use rstest::rstest;
use std::str::FromStr;
use univkbd::key::{Key, KeyType};
use univkbd::keycodes::KeyCode;

#[rstest]
#[case(KeyType::Shift, "Shift")]
#[case(KeyType::CapsLock, "Caps Lock")]
#[case(KeyType::Up, "↑")]
#[case(KeyType::Down, "↓")]
#[case(KeyType::Left, "←")]
#[case(KeyType::Right, "→")]
#[case(KeyType::Fn1, "F1")]
#[case(KeyType::Fn12, "F12")]
#[case(KeyType::Config, "Config")]
#[case(KeyType::OpenClose, "Open/Close")]
fn test_control_labels(#[case] key_type: KeyType, #[case] expected: &str) {
    let key = Key::control(key_type, 1.0, 1.0);
    assert_eq!(key.label(0), expected);
    assert_eq!(key.label(5), expected, "control labels ignore the level");
}

#[rstest]
#[case("é2~", 0, "é")]
#[case("é2~", 1, "2")]
#[case("é2~", 2, "~")]
#[case("é2~", 3, "~")]
#[case("aA", 2, "A")]
#[case("²", 7, "²")]
#[case("", 0, "")]
fn test_regular_label_clamps(#[case] chars: &str, #[case] level: usize, #[case] expected: &str) {
    let key = Key::regular(chars, 1.0, 1.0);
    assert_eq!(key.label(level), expected);
}

#[rstest]
#[case(KeyType::Esc, KeyCode::ESCAPE)]
#[case(KeyType::Enter, KeyCode::ENTER)]
#[case(KeyType::Space, KeyCode::SPACE)]
#[case(KeyType::Alt, KeyCode::ALT)]
#[case(KeyType::Fn5, KeyCode(0x0100_0034))]
#[case(KeyType::Config, KeyCode::UNKNOWN)]
#[case(KeyType::OpenClose, KeyCode::UNKNOWN)]
fn test_control_key_codes(#[case] key_type: KeyType, #[case] expected: KeyCode) {
    assert_eq!(Key::control(key_type, 1.0, 1.0).to_key_code(), expected);
}

#[test]
fn test_regular_key_code_uses_first_character() {
    assert_eq!(Key::regular("é2~", 1.0, 1.0).to_key_code(), KeyCode(0xE9));
    assert_eq!(Key::regular("", 1.0, 1.0).to_key_code(), KeyCode::UNKNOWN);
}

#[test]
fn test_with_characters_keeps_geometry() {
    let key = Key::regular("aA", 1.25, 2.0).placed_at(3.5, 2.0);
    let swapped = key.with_characters("qQ@");

    assert_eq!(swapped.characters(), "qQ@");
    assert_eq!(swapped.levels(), 3);
    assert_eq!(swapped.x_span(), 1.25);
    assert_eq!(swapped.y_span(), 2.0);
    assert_eq!((swapped.x(), swapped.y()), (3.5, 2.0));
    assert_eq!(key.characters(), "aA", "original is untouched");
}

#[test]
fn test_specials_follow_character_levels() {
    let mut key = Key::regular("eE", 1.0, 1.0);
    key.set_specials(0, vec!["é".into(), "è".into(), "ê".into()])
        .unwrap();
    assert_eq!(key.specials(0), ["é", "è", "ê"]);
    assert!(key.specials(1).is_empty());
    assert!(key.set_specials(2, vec!["x".into()]).is_err());

    let grown = key.with_characters("eE€");
    assert_eq!(grown.specials(0).len(), 3);
    assert!(grown.specials(2).is_empty());

    let shrunk = key.with_characters("e");
    assert!(shrunk.specials(1).is_empty());
}

#[test]
fn test_key_type_names() {
    assert_eq!(KeyType::CapsLock.to_string(), "caps_lock");
    assert_eq!(KeyType::from_str("open_close").unwrap(), KeyType::OpenClose);
    assert!(KeyType::from_str("hyper").is_err());
}

#[test]
fn test_json_shape() {
    let key = Key::control(KeyType::Shift, 1.75, 1.0);
    let json = serde_json::to_value(&key).unwrap();
    assert_eq!(json["type"], "shift");
    assert_eq!(json["x_span"], 1.75);

    let back: Key = serde_json::from_value(json).unwrap();
    assert_eq!(back, key);
}
