use std::fs;
use std::path::Path;

use lichen::config::LicenseConfig;
use lichen::processor::Processor;
use tempfile::tempdir;

fn processor() -> Processor {
  Processor::new(LicenseConfig::default())
}

#[test]
fn test_update_year_single_file() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("old.py");
  fs::write(
    &file_path,
    "# Copyright (C) 2022 Author\n#\n# Licensed under the MIT license\n\ndef test():\n    pass\n",
  )
  .unwrap();

  let updated = processor().update_year(&file_path, Some(2025));
  assert_eq!(updated, 1);

  let content = fs::read_to_string(&file_path).unwrap();
  assert!(content.contains("# Copyright (C) 2025 Author"));
  assert!(!content.contains("2022"));
  assert!(content.contains("def test():"));
}

#[test]
fn test_update_year_noop_when_year_already_current() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("current.py");
  let original = "# Copyright (C) 2025 Author\n\ncode = True\n";
  fs::write(&file_path, original).unwrap();

  let updated = processor().update_year(&file_path, Some(2025));

  assert_eq!(updated, 0);
  assert_eq!(fs::read_to_string(&file_path).unwrap(), original);
}

#[test]
fn test_update_year_noop_without_header() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("plain.py");
  let original = "def nothing():\n    return 2022\n";
  fs::write(&file_path, original).unwrap();

  let updated = processor().update_year(&file_path, Some(2025));

  assert_eq!(updated, 0);
  assert_eq!(fs::read_to_string(&file_path).unwrap(), original);
}

#[test]
fn test_update_year_only_touches_comment_lines() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("mixed.py");
  fs::write(
    &file_path,
    "# Copyright (C) 2022 Author\n\nRELEASE_YEAR = 2022\n",
  )
  .unwrap();

  assert_eq!(processor().update_year(&file_path, Some(2025)), 1);

  let content = fs::read_to_string(&file_path).unwrap();
  assert!(content.contains("# Copyright (C) 2025 Author"));
  assert!(content.contains("RELEASE_YEAR = 2022"), "code lines must stay untouched");
}

#[test]
fn test_update_year_recurses_and_prunes() {
  let temp_dir = tempdir().unwrap();
  let nested = temp_dir.path().join("src");
  let ignored = temp_dir.path().join(".git");
  fs::create_dir_all(&nested).unwrap();
  fs::create_dir_all(&ignored).unwrap();

  let header = "# Copyright (C) 2020 Team\n\nx = 1\n";
  fs::write(temp_dir.path().join("a.py"), header).unwrap();
  fs::write(nested.join("b.py"), header).unwrap();
  fs::write(ignored.join("c.py"), header).unwrap();

  let updated = processor().update_year(temp_dir.path(), Some(2025));
  assert_eq!(updated, 2);

  assert_eq!(fs::read_to_string(ignored.join("c.py")).unwrap(), header);
}

#[test]
fn test_update_year_defaults_to_current_year() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("dated.py");
  fs::write(&file_path, "# Copyright (C) 1999 Author\n\nx = 1\n").unwrap();

  assert_eq!(processor().update_year(&file_path, None), 1);

  let content = fs::read_to_string(&file_path).unwrap();
  let current_year = lichen::templates::current_year().to_string();
  assert!(content.contains(&current_year));
}

#[test]
fn test_update_year_missing_path() {
  assert_eq!(processor().update_year(Path::new("/no/such/tree"), Some(2025)), 0);
}

#[test]
fn test_verify_counts_matching_files() {
  let temp_dir = tempdir().unwrap();
  let p = processor();

  // One file that gets a real MIT header
  let licensed = temp_dir.path().join("licensed.py");
  fs::write(&licensed, "def ok(): pass\n").unwrap();
  p.apply(&licensed, "mit", "Team", Some(2023), None, false).unwrap();

  // One file with a different license
  fs::write(
    temp_dir.path().join("gpl.py"),
    "# Copyright (C) 2023 Team\n#\n# This program is free software\n\ndef other(): pass\n",
  )
  .unwrap();

  // One file with no header at all
  fs::write(temp_dir.path().join("bare.py"), "def bare(): pass\n").unwrap();

  // Unsupported and binary files are not eligible
  fs::write(temp_dir.path().join("notes.txt"), "copyright? none\n").unwrap();
  fs::write(temp_dir.path().join("blob.bin"), b"\x00\x01").unwrap();

  let (with_license, total) = p.verify(temp_dir.path(), "mit");
  assert_eq!(total, 3);
  assert_eq!(with_license, 1);
}

#[test]
fn test_verify_single_file() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("single.py");
  fs::write(&file_path, "y = 2\n").unwrap();

  let p = processor();
  assert_eq!(p.verify(&file_path, "mit"), (0, 1));

  p.apply(&file_path, "mit", "Team", Some(2023), None, false).unwrap();
  assert_eq!(p.verify(&file_path, "mit"), (1, 1));
}

#[test]
fn test_verify_ineligible_single_file() {
  let temp_dir = tempdir().unwrap();
  let txt_path = temp_dir.path().join("notes.txt");
  fs::write(&txt_path, "plain text\n").unwrap();

  assert_eq!(processor().verify(&txt_path, "mit"), (0, 0));
}

#[test]
fn test_verify_unknown_template_uses_generic_phrases() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("custom.py");
  fs::write(&file_path, "# Copyright 2023 Somebody\n\nz = 3\n").unwrap();

  // Generic fallback needs half of ["copyright", "license"]; the header's
  // "copyright" alone is enough
  assert_eq!(processor().verify(&file_path, "proprietary"), (1, 1));
}

#[test]
fn test_verify_matches_phrases_inside_first_twenty_lines() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("late_but_visible.py");

  // Header line in the detection window, key phrases on lines 19-20
  let mut lines = vec!["# Copyright (c) Acme".to_string()];
  lines.extend((0..17).map(|i| format!("value_{i} = {i}")));
  lines.push("# The MIT License".to_string());
  lines.push("# Permission is hereby granted, without restriction".to_string());
  fs::write(&file_path, lines.join("\n")).unwrap();

  assert_eq!(processor().verify(&file_path, "mit"), (1, 1));
}

#[test]
fn test_verify_ignores_phrases_past_twenty_lines() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("too_late.py");

  // Same phrases, pushed to lines 21-22; the file still counts as
  // eligible but must not count as matching
  let mut lines = vec!["# Copyright (c) Acme".to_string()];
  lines.extend((0..19).map(|i| format!("value_{i} = {i}")));
  lines.push("# The MIT License".to_string());
  lines.push("# Permission is hereby granted, without restriction".to_string());
  fs::write(&file_path, lines.join("\n")).unwrap();

  assert_eq!(processor().verify(&file_path, "mit"), (0, 1));
}

#[test]
fn test_verify_tolerates_reflowed_header() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("reflowed.py");
  fs::write(
    &file_path,
    "# The   MIT\t License\n# Permission is  hereby   granted, without restriction\n\nw = 4\n",
  )
  .unwrap();

  let (with_license, total) = processor().verify(&file_path, "mit");
  assert_eq!((with_license, total), (1, 1));
}

#[test]
fn test_verify_missing_path() {
  assert_eq!(processor().verify(Path::new("/no/such/tree"), "mit"), (0, 0));
}

#[test]
fn test_create_license_file() {
  let temp_dir = tempdir().unwrap();

  let created = processor()
    .create_license_file(temp_dir.path(), "mit", "Test Author", Some(2023), None)
    .unwrap();
  assert!(created);

  let content = fs::read_to_string(temp_dir.path().join("LICENSE")).unwrap();
  assert!(content.starts_with("The MIT License (MIT)"), "LICENSE body must not be commented");
  assert!(content.contains("Copyright (c) 2023 Test Author"));
  assert!(!content.contains("# "));
}

#[test]
fn test_create_license_file_rejects_non_directory() {
  let temp_dir = tempdir().unwrap();
  let file_path = temp_dir.path().join("not_a_dir.py");
  fs::write(&file_path, "x = 1\n").unwrap();

  let created = processor()
    .create_license_file(&file_path, "mit", "Test Author", Some(2023), None)
    .unwrap();
  assert!(!created);
}

#[test]
fn test_create_license_file_overwrites_existing() {
  let temp_dir = tempdir().unwrap();
  fs::write(temp_dir.path().join("LICENSE"), "old text").unwrap();

  let created = processor()
    .create_license_file(temp_dir.path(), "apache2", "Org", Some(2024), None)
    .unwrap();
  assert!(created);

  let content = fs::read_to_string(temp_dir.path().join("LICENSE")).unwrap();
  assert!(content.contains("Apache License, Version 2.0"));
  assert!(!content.contains("old text"));
}
