use rs_distiller::{extract_bytes, Distiller, ModelRegistry, PageSource};

#[test]
fn utf8_content_handled_correctly() {
    let html = "\
        <html>\
        <head><meta charset=\"utf-8\"></head>\
        <body>\
            <article>\
                <p>This is UTF-8 content with special characters: é, ñ, ü, 中文</p>\
            </article>\
        </body>\
        </html>\
    "
    .as_bytes();

    match extract_bytes(html, None) {
        Ok(doc) => {
            assert!(doc.body.contains("UTF-8 content"));
            assert!(doc.body.contains("é"));
            assert!(doc.body.contains("ñ"));
            assert!(doc.body.contains("中文"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn iso88591_meta_is_honored() {
    let html = b"<html>\
        <head><meta charset=\"ISO-8859-1\"></head>\
        <body><article>\
            <p>The Caf\xE9 espa\xF1ol in M\xFCnchen reopened this week.</p>\
        </article></body></html>";

    match extract_bytes(html, None) {
        Ok(doc) => {
            assert!(doc.body.contains("Café"));
            assert!(doc.body.contains("español"));
            assert!(doc.body.contains("München"));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn http_equiv_content_type_is_honored() {
    let html = b"<html>\
        <head><meta http-equiv=\"Content-Type\" content=\"text/html; charset=windows-1252\"></head>\
        <body><article>\
            <p>\x93Smart quotes\x94 and an en\x96dash appear here.</p>\
        </article></body></html>";

    match extract_bytes(html, None) {
        Ok(doc) => {
            assert!(doc.body.contains('\u{201C}'));
            assert!(doc.body.contains('\u{2013}'));
        }
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn declared_encoding_wins_over_meta() {
    // Bytes are Latin-1 although the markup claims UTF-8.
    let html = b"<html><head><meta charset=\"utf-8\"></head>\
        <body><article><p>Die Br\xFCcke in K\xF6ln ist wieder offen.</p></article></body></html>";

    match extract_bytes(html, Some("text/html; charset=iso-8859-1")) {
        Ok(doc) => assert!(doc.body.contains("Brücke in Köln")),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn utf8_assumed_without_declaration() {
    let html = "<html><body><article><p>Zoë moved to Zürich for work.</p></article></body></html>";

    match extract_bytes(html.as_bytes(), None) {
        Ok(doc) => assert_eq!(doc.body, "Zoë moved to Zürich for work."),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}

#[test]
fn page_source_encoding_reaches_the_extractor() {
    let registry = match ModelRegistry::shared() {
        Ok(registry) => registry,
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    };
    let source = PageSource::Html {
        bytes: b"<html><body><article><p>Fran\xE7ois Hollande visited Paris today.</p></article></body></html>"
            .to_vec(),
        encoding: Some("latin1".into()),
    };

    match Distiller::new(registry).run(&source) {
        Ok(record) => assert_eq!(record.content(), "François Hollande visited Paris today."),
        Err(err) => panic!("expected Ok(_), got Err({err:?})"),
    }
}
