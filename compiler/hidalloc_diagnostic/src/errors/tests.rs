use super::*;

#[test]
fn every_code_is_documented() {
    for code in ErrorCode::ALL {
        assert!(ErrorDocs::get(*code).is_some(), "{code} has no docs");
    }
}

#[test]
fn docs_open_with_their_code() {
    for &code in ErrorCode::ALL {
        let doc = ErrorDocs::get(code).unwrap_or_default();
        assert!(
            doc.starts_with(&format!("# {code}:")),
            "{code} docs should start with a heading naming the code"
        );
    }
}

#[test]
fn boxing_docs_mention_overrides() {
    let doc = ErrorDocs::get(ErrorCode::A0002).unwrap_or_default();
    assert!(doc.contains("GetHashCode"));
    assert!(doc.contains("override"));
}
