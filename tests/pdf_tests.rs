#![cfg(feature = "pdf")]

use std::io::Write;

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use vat_finder::scan::extract_from_pages;
use vat_finder::source::{PageSource, PdfTextSource};
use vat_finder::{Candidate, ExtractionError, FinderError, VatFinder};

/// Build a PDF in memory with one text line per page.
fn pdf_with_pages(lines: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => Object::Reference(font_id),
        },
    });

    let mut kids = Vec::new();
    for line in lines {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(*line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let mut output = Vec::new();
    doc.save_to(&mut output).expect("save test PDF");
    output
}

fn write_temp(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(bytes).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn pages_come_out_in_order() {
    let pdf = pdf_with_pages(&["Seller VAT: DE123456789", "Buyer: ATU12345678"]);

    let pages = PdfTextSource::new().pages_from_bytes(&pdf).unwrap();

    assert_eq!(pages.len(), 2);
    assert!(pages[0].contains("DE123456789"), "{:?}", pages[0]);
    assert!(pages[1].contains("ATU12345678"), "{:?}", pages[1]);
    assert_eq!(
        extract_from_pages(&pages),
        vec![
            Candidate::new("DE", "123456789"),
            Candidate::new("AT", "U12345678"),
        ]
    );
}

#[test]
fn reads_pdf_from_disk() {
    let file = write_temp(&pdf_with_pages(&["VAT NL 123456789 B01"]));

    let found = VatFinder::new(PdfTextSource::new())
        .extract_document(file.path())
        .unwrap();

    assert_eq!(found, vec![Candidate::new("NL", "123456789B01")]);
}

#[test]
fn garbage_is_a_parse_error() {
    let file = write_temp(b"this is not a pdf");

    let err = PdfTextSource::new().pages(file.path()).unwrap_err();
    assert!(matches!(err, ExtractionError::Parse(_)), "{err:?}");

    let err = VatFinder::new(PdfTextSource::new())
        .extract_document(file.path())
        .unwrap_err();
    assert!(matches!(err, FinderError::Extraction { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.pdf");

    let err = PdfTextSource::new().pages(&missing).unwrap_err();
    assert!(matches!(err, ExtractionError::Io(_)), "{err:?}");
}
