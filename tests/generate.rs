use faces_config::{generate_faces_config, measure_encoded_bytes, Anchor, GeneratorSettings, Rect};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;
use std::path::Path;
use tempfile::TempDir;

fn settings_in(root: &Path) -> GeneratorSettings {
    GeneratorSettings {
        faces_dir: root.join("faces"),
        blank_path: root.join("facecam-blank.png"),
        output_path: root.join("faces-config.json"),
        ..Default::default()
    }
}

/// White canvas with black pixels at `dark`.
fn write_face(path: &Path, w: u32, h: u32, dark: &[(u32, u32)]) {
    let mut img = RgbImage::from_pixel(w, h, Rgb([255, 255, 255]));
    for &(x, y) in dark {
        img.put_pixel(x, y, Rgb([0, 0, 0]));
    }
    img.save(path).unwrap();
}

fn faces_dir(dir: &TempDir) -> std::path::PathBuf {
    let faces = dir.path().join("faces");
    std::fs::create_dir_all(&faces).unwrap();
    faces
}

#[test]
fn two_faces_align_to_lowest_body() {
    let dir = tempfile::tempdir().unwrap();
    let faces = faces_dir(&dir);
    write_face(&faces.join("facecam-1.png"), 100, 200, &[(10, 190)]);
    write_face(&faces.join("facecam-2.png"), 100, 200, &[(10, 150)]);

    let settings = settings_in(dir.path());
    let report = generate_faces_config(settings.clone()).unwrap();

    let faces = &report.config.faces;
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[0].id, "face-1");
    assert_eq!(faces[0].body_bottom, 190);
    assert_eq!(faces[0].alignment_offset, 0);
    assert_eq!(faces[0].left_anchor, Anchor(10, 190));
    assert_eq!(faces[1].id, "face-2");
    assert_eq!(faces[1].body_bottom, 150);
    assert_eq!(faces[1].alignment_offset, 40);
    assert_eq!(report.max_body_bottom, Some(190));

    let written = std::fs::read_to_string(&settings.output_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed["faces"][1]["alignment_offset"], 40);
    assert_eq!(parsed["faces"][0]["targetFrame"]["height"], 82);
}

#[test]
fn empty_run_writes_empty_faces() {
    let dir = tempfile::tempdir().unwrap();
    faces_dir(&dir);
    let settings = settings_in(dir.path());

    let report = generate_faces_config(settings.clone()).unwrap();
    assert!(report.config.is_empty());

    let written = std::fs::read_to_string(&settings.output_path).unwrap();
    assert_eq!(written, "{\n  \"faces\": []\n}");
}

#[test]
fn rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let faces = faces_dir(&dir);
    write_face(&dir.path().join("facecam-blank.png"), 330, 240, &[(5, 230), (320, 231)]);
    write_face(&faces.join("facecam-3.png"), 90, 120, &[(1, 100), (89, 80)]);
    write_face(&faces.join("facecam-10.png"), 90, 120, &[]);
    let settings = settings_in(dir.path());

    generate_faces_config(settings.clone()).unwrap();
    let first = std::fs::read(&settings.output_path).unwrap();
    generate_faces_config(settings.clone()).unwrap();
    let second = std::fs::read(&settings.output_path).unwrap();

    assert_eq!(first, second);
}

#[test]
fn blank_then_sorted_faces_with_invariants() {
    let dir = tempfile::tempdir().unwrap();
    let faces = faces_dir(&dir);
    write_face(&dir.path().join("facecam-blank.png"), 330, 240, &[(5, 230), (320, 231)]);
    write_face(&faces.join("facecam-3.png"), 90, 120, &[(1, 100), (89, 80)]);
    write_face(&faces.join("facecam-10.png"), 90, 120, &[]);
    write_face(&faces.join("facecam-blank-old.png"), 10, 10, &[]);

    let report = generate_faces_config(settings_in(dir.path())).unwrap();
    let records = &report.config.faces;

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["blank", "face-10", "face-3"]);

    let blank = &records[0];
    assert_eq!(
        blank.target_frame,
        Rect {
            x: 110,
            y: 80,
            width: 110,
            height: 105
        }
    );
    assert_eq!(blank.body_bottom, 231);
    assert_eq!(blank.right_anchor, Anchor(320, 231));
    assert_eq!(blank.left_anchor, Anchor(5, 230));

    // fully bright face resolves to the bottom-edge defaults
    let bright = &records[1];
    assert_eq!(bright.left_anchor, Anchor(0, 119));
    assert_eq!(bright.right_anchor, Anchor(89, 119));
    assert_eq!(bright.body_bottom, 119);
    assert_eq!(bright.image, dir.path().join("faces").join("facecam-10.png").to_string_lossy());

    let face3 = &records[2];
    assert_eq!(face3.body_bottom, 100);
    assert_eq!(face3.right_anchor, Anchor(89, 80));
    assert_eq!(
        face3.target_frame,
        Rect {
            x: 31,
            y: 37,
            width: 31,
            height: 49
        }
    );

    let max = records.iter().map(|r| r.body_bottom).max().unwrap();
    for r in records {
        assert_eq!(r.alignment_offset, max - r.body_bottom);
    }
    assert_eq!(records.iter().map(|r| r.alignment_offset).min(), Some(0));
}

#[test]
fn threshold_setting_changes_detection() {
    let dir = tempfile::tempdir().unwrap();
    let faces = faces_dir(&dir);
    let mut img = RgbImage::from_pixel(60, 50, Rgb([255, 255, 255]));
    img.put_pixel(3, 45, Rgb([120, 120, 120]));
    img.save(faces.join("facecam-gray.png")).unwrap();

    let mut settings = settings_in(dir.path());
    let report = generate_faces_config(settings.clone()).unwrap();
    assert_eq!(report.config.faces[0].body_bottom, 49);

    settings.darkness_threshold = 121;
    let report = generate_faces_config(settings).unwrap();
    assert_eq!(report.config.faces[0].left_anchor, Anchor(3, 45));
    assert_eq!(report.config.faces[0].body_bottom, 45);
}

#[test]
fn encoded_bytes_measurement() {
    let mut img = RgbaImage::from_pixel(30, 20, Rgba([255, 255, 255, 255]));
    img.put_pixel(29, 12, Rgba([0, 0, 0, 255]));
    let mut bytes = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();

    let m = measure_encoded_bytes(&bytes, 100).unwrap();
    assert_eq!((m.width, m.height), (30, 20));
    assert_eq!(m.anchors.right, Anchor(29, 12));
    assert_eq!(m.anchors.left, Anchor(0, 19));
    assert_eq!(m.anchors.body_bottom, 12);
}
