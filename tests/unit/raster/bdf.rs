use super::*;

const TINY_BDF: &str = "STARTFONT 2.1
FONT -test-tiny
SIZE 5 75 75
FONTBOUNDINGBOX 3 6 0 -1
STARTPROPERTIES 2
FONT_ASCENT 5
FONT_DESCENT 1
ENDPROPERTIES
CHARS 3
STARTCHAR A
ENCODING 65
SWIDTH 500 0
DWIDTH 4 0
BBX 3 5 0 0
BITMAP
40
A0
E0
A0
A0
ENDCHAR
STARTCHAR space
ENCODING 32
DWIDTH 2 0
BBX 0 0 0 0
BITMAP
ENDCHAR
STARTCHAR I
ENCODING 73
DWIDTH 2 0
BBX 1 5 0 0
BITMAP
80
80
80
80
80
ENDCHAR
ENDFONT
";

#[test]
fn parses_metrics_and_glyphs() {
    let font = BdfFont::parse(TINY_BDF).unwrap();
    assert_eq!(font.glyph_count(), 3);
    assert_eq!(font.height(), 6);
    assert_eq!(font.baseline(), 5);
    assert_eq!(font.character_width('A'), 4);
    assert_eq!(font.character_width(' '), 2);
    assert_eq!(font.character_width('I'), 2);
}

#[test]
fn unknown_glyph_uses_bounding_box_advance() {
    let font = BdfFont::parse(TINY_BDF).unwrap();
    assert_eq!(font.character_width('Z'), 3);
    let mut s = Surface::new(8, 8);
    assert_eq!(font.draw_glyph(&mut s, 0, 5, Color::RED, 'Z'), 3);
    assert_eq!(s.lit_pixel_count(), 0);
}

#[test]
fn draws_bitmap_rows_above_the_baseline() {
    let font = BdfFont::parse(TINY_BDF).unwrap();
    let mut s = Surface::new(8, 8);
    let advance = font.draw_glyph(&mut s, 0, 5, Color::RED, 'A');
    assert_eq!(advance, 4);
    assert_eq!(s.lit_pixel_count(), 10);
    assert_eq!(s.get_pixel(1, 0), Some(Color::RED));
    assert_eq!(s.get_pixel(0, 0), Some(Color::BLACK));
    assert_eq!(s.get_pixel(0, 4), Some(Color::RED));
    assert_eq!(s.get_pixel(0, 5), Some(Color::BLACK));
}

#[test]
fn rejects_sources_without_glyphs_or_with_bad_rows() {
    assert!(matches!(
        BdfFont::parse(""),
        Err(SignError::Configuration(_))
    ));
    let broken = TINY_BDF.replace("E0", "ZZ");
    assert!(BdfFont::parse(&broken).is_err());
}

#[test]
fn load_reports_missing_file_as_configuration_error() {
    let err = BdfFont::load(Path::new("target/definitely/missing.bdf")).unwrap_err();
    assert!(matches!(err, SignError::Configuration(_)));
}
