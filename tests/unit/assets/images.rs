use super::*;

fn temp_dir(tag: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "workshop-sign-images-{tag}-{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(dir: &Path, name: &str, w: u32, h: u32) {
    let mut buf = image::RgbaImage::new(w, h);
    for (x, _y, px) in buf.enumerate_pixels_mut() {
        *px = if x % 2 == 0 {
            image::Rgba([255, 255, 255, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        };
    }
    buf.save(dir.join(format!("{name}.png"))).unwrap();
}

#[test]
fn target_size_policies() {
    assert_eq!(target_size(40, 20, None, None), (40, 20));
    assert_eq!(target_size(40, 20, Some(10), Some(30)), (10, 30));
    assert_eq!(target_size(40, 20, None, Some(10)), (20, 10));
    assert_eq!(target_size(40, 20, Some(20), None), (20, 10));
    assert_eq!(target_size(100, 1, Some(10), None), (10, 1));
}

#[test]
fn loads_resizes_and_caches() {
    let dir = temp_dir("load");
    write_png(&dir, "chevron", 8, 4);

    let store = ImageStore::new(&dir, LogHandle::disabled());
    let native = store.load("chevron", None, None).unwrap();
    assert_eq!((native.width(), native.height()), (8, 4));
    assert_eq!(native.pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(native.pixel(1, 0)[3], 0);

    let half = store.load("chevron", None, Some(2)).unwrap();
    assert_eq!((half.width(), half.height()), (4, 2));

    let again = store.load("chevron", None, Some(2)).unwrap();
    assert!(Arc::ptr_eq(&half, &again));
    assert_eq!(store.cached_count(), 2);
}

#[test]
fn missing_image_is_a_configuration_error() {
    let dir = temp_dir("missing");
    let store = ImageStore::new(&dir, LogHandle::disabled());
    let err = store.load("nope", None, None).unwrap_err();
    assert!(matches!(err, SignError::Configuration(_)));
    assert_eq!(store.cached_count(), 0);
}

#[test]
fn undecodable_image_is_a_configuration_error() {
    let dir = temp_dir("garbage");
    std::fs::write(dir.join("broken.png"), b"not a png").unwrap();
    let store = ImageStore::new(&dir, LogHandle::disabled());
    assert!(matches!(
        store.load("broken", None, None),
        Err(SignError::Configuration(_))
    ));
}
