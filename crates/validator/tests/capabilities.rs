//! Uniqueness lookups, attachments and content sniffing.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use validata::foundation::LookupError;
use validata::prelude::*;

const PNG: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0x0D];
const PDF: &[u8] = b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n";

// ============================================================================
// UNIQUENESS
// ============================================================================

#[derive(Default)]
struct Taken {
    values: Vec<&'static str>,
    calls: AtomicUsize,
}

#[async_trait]
impl UniquenessLookup for Taken {
    async fn exists(&self, table: &str, column: &str, value: &str) -> Result<bool, LookupError> {
        assert_eq!((table, column), ("users", "email_address"));
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.values.contains(&value))
    }
}

struct Broken;

#[async_trait]
impl UniquenessLookup for Broken {
    async fn exists(&self, _: &str, _: &str, _: &str) -> Result<bool, LookupError> {
        Err(LookupError::backend(std::io::Error::other("connection refused")))
    }
}

struct Panicking;

#[async_trait]
impl UniquenessLookup for Panicking {
    async fn exists(&self, _: &str, _: &str, _: &str) -> Result<bool, LookupError> {
        panic!("lookup blew up");
    }
}

#[tokio::test]
async fn taken_value_violates_unique() {
    let lookup = Arc::new(Taken {
        values: vec!["kofi@mail.gh"],
        ..Taken::default()
    });
    let validator = Validator::builder()
        .uniqueness_shared(lookup.clone())
        .build()
        .unwrap();

    let record = record! {
        "email": "required|email|unique:users.EmailAddress" => "kofi@mail.gh",
        "backup_email": "unique:users.email_address" => "ama@mail.gh",
    };
    let result = validator.validate(&record, None).await.unwrap().unwrap();

    assert_eq!(result.message("email"), Some("The email has already been taken."));
    assert!(result.passed("backup_email"));
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn unique_is_not_consulted_after_an_earlier_failure() {
    let lookup = Arc::new(Taken::default());
    let validator = Validator::builder()
        .uniqueness_shared(lookup.clone())
        .build()
        .unwrap();

    let record = record! { "email": "email|unique:users.email_address" => "not-an-email" };
    let result = validator.validate(&record, None).await.unwrap().unwrap();

    assert_eq!(result.message("email"), Some("The email field must be a valid email address."));
    assert_eq!(lookup.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn lookup_failure_aborts_the_whole_record() {
    let validator = Validator::builder().uniqueness(Broken).build().unwrap();
    let record = record! {
        "name": "required" => "",
        "email": "unique:users.email" => "kofi@mail.gh",
    };

    let err = validator.validate(&record, None).await.unwrap_err();
    assert!(matches!(err, ValidataError::Lookup { ref field, .. } if field == "email"));
}

#[tokio::test]
async fn unique_without_lookup_is_fatal() {
    let record = record! { "email": "unique:users.email" => "kofi@mail.gh" };
    let err = Validator::new().unwrap().validate(&record, None).await.unwrap_err();
    assert!(matches!(err, ValidataError::NoUniquenessLookup { .. }));
}

#[tokio::test]
async fn panicking_task_becomes_a_fault() {
    let validator = Validator::builder().uniqueness(Panicking).build().unwrap();
    let record = record! {
        "name": "required" => "Ama",
        "email": "unique:users.email" => "kofi@mail.gh",
    };

    let err = validator.validate(&record, None).await.unwrap_err();
    assert!(matches!(err, ValidataError::TaskPanicked { ref field, .. } if field == "email"));
}

// ============================================================================
// ATTACHMENTS
// ============================================================================

fn validator() -> Validator {
    Validator::new().unwrap()
}

async fn attachment_message(rules: &str, attachment: Attachment) -> Option<String> {
    let record = Record::new().field("avatar", rules, attachment);
    validator()
        .validate(&record, None)
        .await
        .unwrap()
        .and_then(|r| r.message("avatar").map(str::to_owned))
}

#[tokio::test]
async fn image_rules_sniff_content() {
    let png = Attachment::from_bytes("me.png", PNG);
    let pdf = Attachment::from_bytes("me.png", PDF);

    assert_eq!(attachment_message("required|image", png.clone()).await, None);
    assert_eq!(
        attachment_message("required|image", pdf.clone()).await.as_deref(),
        Some("The avatar field must be an image.")
    );
    assert_eq!(
        attachment_message("image:jpg,webp", png.clone()).await.as_deref(),
        Some("The avatar field must be an image of type: jpg,webp.")
    );
    assert_eq!(attachment_message("mimes:pdf", pdf).await, None);
    assert_eq!(
        attachment_message("file:pdf,docx", png).await.as_deref(),
        Some("The avatar field must be a file of type: pdf,docx.")
    );
}

#[tokio::test]
async fn size_threshold_uses_binary_units() {
    let exact = Attachment::from_bytes("a.bin", vec![0_u8; 1024]);
    let over = Attachment::from_bytes("a.bin", vec![0_u8; 1025]);

    assert_eq!(attachment_message("size:1KB", exact).await, None);
    assert_eq!(
        attachment_message("size:1kb", over).await.as_deref(),
        Some("The avatar field must not be greater than 1 kilobytes.")
    );
}

#[tokio::test]
async fn malformed_size_is_always_fatal() {
    let record = Record::new().field("avatar", "size:12XB", Attachment::from_bytes("a", PNG));
    let err = validator().validate(&record, None).await.unwrap_err();
    assert!(matches!(err, ValidataError::InvalidRule { ref directive, .. } if directive == "size:12XB"));
}

#[tokio::test]
async fn attachments_on_disk_are_read_lazily() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("upload.png");
    tokio::fs::write(&path, PNG).await.unwrap();

    let present = Attachment::from_path("upload.png", &path, PNG.len() as u64);
    let missing = Attachment::from_path("gone.png", dir.path().join("gone.png"), 10);

    assert_eq!(attachment_message("file|image", present).await, None);
    assert_eq!(
        attachment_message("file|image", missing).await.as_deref(),
        Some("The avatar field must be a file.")
    );
}

#[tokio::test]
async fn attachment_lists_report_per_element() {
    let record = record! {
        "photos": "image" => vec![
            Attachment::from_bytes("a.png", PNG),
            Attachment::from_bytes("b.pdf", PDF),
        ],
    };
    let result = validator().validate(&record, None).await.unwrap().unwrap();
    assert_eq!(
        result.get("photos"),
        Some(&FieldError::Elements(vec![
            None,
            Some("The photos (2) field must be an image.".into()),
        ]))
    );
}

struct ByFilename;

impl ContentSniffer for ByFilename {
    fn detect(&self, bytes: &[u8]) -> Option<String> {
        (bytes == b"csv").then(|| "csv".to_owned())
    }
}

#[tokio::test]
async fn custom_sniffer_replaces_the_default() {
    let validator = Validator::builder().sniffer(ByFilename).build().unwrap();
    let record = record! {
        "report": "mimes:csv" => Attachment::from_bytes("r.csv", &b"csv"[..]),
        "photo": "image" => Attachment::from_bytes("p.png", PNG),
    };
    let result = validator.validate(&record, None).await.unwrap().unwrap();
    assert!(result.passed("report"));
    assert_eq!(result.message("photo"), Some("The photo field must be an image."));
}

#[tokio::test]
async fn without_sniffer_type_rules_reject() {
    let validator = Validator::builder().without_sniffer().build().unwrap();
    let record = record! { "photo": "image" => Attachment::from_bytes("p.png", PNG) };
    assert!(validator.validate(&record, None).await.unwrap().is_some());
}
