//! Tests for identifier extraction from page markup.

use sites_drive::extractor::extract_ids;

mod file_ids {
    use super::*;

    #[test]
    fn viewer_and_preview_links() {
        let markup = r#"
            <a href="https://drive.google.com/file/d/1abc123XYZ-_def456/view?usp=sharing">A</a>
            <iframe src="https://drive.google.com/file/d/2preview/preview"></iframe>
        "#;
        let ids = extract_ids(markup);
        assert_eq!(ids.file_ids.len(), 2);
        assert!(ids.file_ids.contains("1abc123XYZ-_def456"));
        assert!(ids.file_ids.contains("2preview"));
    }

    #[test]
    fn open_links() {
        let ids = extract_ids(r#"<a href="https://drive.google.com/open?id=1open_ID">x</a>"#);
        assert!(ids.file_ids.contains("1open_ID"));
    }

    #[test]
    fn duplicates_collapse() {
        let markup = "/file/d/AAA /file/d/BBB /file/d/AAA /file/d/CCC /file/d/BBB open?id=AAA";
        let ids = extract_ids(markup);
        assert_eq!(ids.file_ids.len(), 3);
    }

    #[test]
    fn id_stops_at_foreign_character() {
        let ids = extract_ids("/file/d/abc123/view /file/d/xyz?usp=1 /file/d/q.w");
        let found: Vec<_> = ids.file_ids.iter().map(String::as_str).collect();
        assert_eq!(found, vec!["abc123", "q", "xyz"]);
    }
}

mod doc_ids {
    use super::*;

    #[test]
    fn document_links() {
        let markup = r#"
            <a href="https://docs.google.com/document/d/1docA/edit">Doc A</a>
            <a href="https://docs.google.com/document/d/1docA/edit#heading=h.1">Doc A again</a>
            <a href="https://docs.google.com/document/d/1docB/pub">Doc B</a>
        "#;
        let ids = extract_ids(markup);
        assert_eq!(ids.doc_ids.len(), 2);
        assert!(ids.file_ids.is_empty());
    }

    #[test]
    fn spreadsheets_are_not_documents() {
        let ids = extract_ids("https://docs.google.com/spreadsheets/d/1sheet/edit");
        assert!(ids.doc_ids.is_empty());
        assert!(ids.file_ids.is_empty());
    }
}

mod folder_urls {
    use super::*;

    #[test]
    fn full_folder_url() {
        let ids = extract_ids(
            r#"<a href="https://drive.google.com/drive/folders/1FolderX?usp=drive_link">F</a>"#,
        );
        assert!(ids
            .folder_urls
            .contains("https://drive.google.com/drive/folders/1FolderX"));
    }

    #[test]
    fn relative_folder_path_is_ignored() {
        let ids = extract_ids(r#"<a href="/drive/folders/1FolderX">F</a>"#);
        assert!(ids.folder_urls.is_empty());
    }
}

mod mixed {
    use super::*;

    #[test]
    fn one_page_many_kinds() {
        let markup = r#"
            https://drive.google.com/file/d/F1/view
            https://drive.google.com/open?id=F2
            https://docs.google.com/document/d/D1/edit
            https://drive.google.com/drive/folders/DIR1
        "#;
        let ids = extract_ids(markup);
        assert_eq!(ids.file_ids.len(), 2);
        assert_eq!(ids.doc_ids.len(), 1);
        assert_eq!(ids.folder_urls.len(), 1);
    }

    #[test]
    fn no_matches() {
        let ids = extract_ids("<html><body><p>Welcome to class!</p></body></html>");
        assert!(ids.is_empty());
    }
}
