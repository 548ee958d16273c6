use super::*;

#[test]
fn parse_lowercase_hex() {
    assert_eq!("#1a2b3c".parse::<Rgb>().unwrap(), Rgb::new(0x1a, 0x2b, 0x3c));
}

#[test]
fn parse_uppercase_hex() {
    assert_eq!("#FF8000".parse::<Rgb>().unwrap(), Rgb::new(255, 128, 0));
}

#[test]
fn parse_trims_whitespace() {
    assert_eq!(" #000000 ".parse::<Rgb>().unwrap(), Rgb::BLACK);
}

#[test]
fn parse_rejects_missing_hash() {
    let err = "ff0000".parse::<Rgb>().unwrap_err();
    assert_eq!(err, ParseColorError("ff0000".into()));
}

#[test]
fn parse_rejects_short_form() {
    assert!("#fff".parse::<Rgb>().is_err());
}

#[test]
fn parse_rejects_non_hex_digits() {
    assert!("#gg0000".parse::<Rgb>().is_err());
}

#[test]
fn parse_rejects_signed_channels() {
    assert!("#+f+f+f".parse::<Rgb>().is_err());
    assert!("#-10000".parse::<Rgb>().is_err());
}

#[test]
fn parse_rejects_multibyte_input() {
    assert!("#ééé".parse::<Rgb>().is_err());
}

#[test]
fn display_is_lowercase_hex() {
    assert_eq!(Rgb::new(255, 0, 171).to_string(), "#ff00ab");
}

#[test]
fn display_parse_roundtrip() {
    let c = Rgb::EXEMPLAR;
    assert_eq!(c.to_string().parse::<Rgb>().unwrap(), c);
}

#[test]
fn serde_uses_hex_string() {
    let json = serde_json::to_string(&Rgb::GUIDE_BLUE).unwrap();
    assert_eq!(json, "\"#0000ff\"");
    let back: Rgb = serde_json::from_str(&json).unwrap();
    assert_eq!(back, Rgb::GUIDE_BLUE);
}

#[test]
fn serde_rejects_bad_string() {
    assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
}

#[test]
fn default_is_black() {
    assert_eq!(Rgb::default(), Rgb::BLACK);
}
