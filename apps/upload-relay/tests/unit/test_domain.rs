use upload_relay::domain::upload::{
    entity::UploadResult,
    errors::UploadError,
    value_objects::{ConfidenceThreshold, UploadFileName},
};

#[test]
fn confidence_threshold_accepts_unit_interval() {
    assert!(ConfidenceThreshold::new(0.0).is_ok());
    assert!(ConfidenceThreshold::new(0.5).is_ok());
    assert!(ConfidenceThreshold::new(1.0).is_ok());
}

#[test]
fn confidence_threshold_rejects_out_of_range() {
    assert!(ConfidenceThreshold::new(-0.1).is_err());
    assert!(ConfidenceThreshold::new(1.5).is_err());
    assert!(ConfidenceThreshold::new(f64::NAN).is_err());
}

#[test]
fn confidence_threshold_defaults_to_half() {
    assert_eq!(ConfidenceThreshold::default().value, 0.5);
}

#[test]
fn plain_file_names_are_single_component() {
    assert!(UploadFileName::new("cat.jpg").is_single_component());
    assert!(UploadFileName::new("..hidden").is_single_component());
    assert!(UploadFileName::new("my photo (1).png").is_single_component());
}

#[test]
fn traversal_file_names_are_flagged() {
    for name in [
        "",
        ".",
        "..",
        "../etc/passwd",
        "/etc/passwd",
        "a/b.png",
        "..\\win.ini",
        "C:\\temp\\x.png",
        "nul\0byte",
    ] {
        assert!(
            !UploadFileName::new(name).is_single_component(),
            "{name:?} should be flagged"
        );
    }
}

#[test]
fn upload_result_requires_tags() {
    let mut result = UploadResult {
        secure_url: "https://cdn.example/a.png".into(),
        ..Default::default()
    };
    assert!(!result.has_tags());
    result.tags.push("a".into());
    assert!(result.has_tags());
}

#[test]
fn upload_result_decodes_provider_payload() {
    let result: UploadResult = serde_json::from_str(
        r#"{"secure_url":"https://cdn.example/a.png","tags":["b","a"],"width":640,"height":480,"resource_type":"image"}"#,
    )
    .unwrap();
    assert_eq!(result.tags, vec!["b", "a"]);
    assert_eq!(result.width, Some(640));
}

#[test]
fn error_messages_are_short_and_stable() {
    assert_eq!(
        UploadError::MissingFile("no part".into()).user_message(),
        "Failed to get uploaded file"
    );
    assert_eq!(
        UploadError::ProviderUpload("503".into()).user_message(),
        "Failed to upload to Cloudinary"
    );
    assert_eq!(
        UploadError::NoTags("u".into()).to_string(),
        "No tags returned from Cloudinary for u"
    );
}
