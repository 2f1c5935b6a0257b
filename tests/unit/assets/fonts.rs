use super::*;

const ONE_GLYPH_BDF: &str = "STARTFONT 2.1
FONTBOUNDINGBOX 2 3 0 0
FONT_ASCENT 3
FONT_DESCENT 0
CHARS 1
STARTCHAR bar
ENCODING 124
DWIDTH 3 0
BBX 1 3 0 0
BITMAP
80
80
80
ENDCHAR
ENDFONT
";

#[test]
fn loads_bdf_from_root_and_caches() {
    let dir = std::env::temp_dir().join(format!("workshop-sign-fonts-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("bar.bdf"), ONE_GLYPH_BDF).unwrap();

    let lib = FontLibrary::new(&dir, LogHandle::disabled());
    let a = lib.load("bar").unwrap();
    assert_eq!(a.character_width('|'), 3);
    assert_eq!(a.height(), 3);
    let b = lib.load_or_fallback("bar");
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn missing_font_falls_back_to_builtin_font() {
    let lib = FontLibrary::new("target/no-such-fonts", LogHandle::disabled());
    assert!(lib.load("7x13").is_err());
    let font = lib.load_or_fallback("7x13");
    assert_eq!(font.character_width('x'), BuiltinFont::Small.character_width('x'));
    assert_eq!(font.height(), 7);
}
