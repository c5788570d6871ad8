//! End-to-end card reading: OCR, field extraction and record output.

use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::{info, warn};

use crate::error::{RecordError, Result};
use crate::extract::{CardParser, ExtractionResult};
use crate::models::contact::{ContactRecord, ExtractedFields};
use crate::ocr::{OcrEngine, OcrResult};
use crate::record;
use crate::storage::{OutputTarget, RecordWriter};

/// Everything learned from one card image.
#[derive(Debug, Clone)]
pub struct CardScan {
    /// Raw OCR output.
    pub ocr: OcrResult,
    /// Extraction result over the OCR text.
    pub extraction: ExtractionResult,
}

impl CardScan {
    /// Extracted contact fields.
    pub fn fields(&self) -> &ExtractedFields {
        &self.extraction.fields
    }

    /// Select the record values.
    pub fn to_record(&self) -> std::result::Result<ContactRecord, RecordError> {
        ContactRecord::from_fields(self.fields())
    }

    /// Serialize the scan as a vCard document.
    pub fn to_vcard(&self) -> std::result::Result<String, RecordError> {
        record::serialize(self.fields())
    }

    /// Serialize the scan and write it to `target`, replacing any previous
    /// record there. Nothing is written when a required field is missing.
    pub fn save_vcard<W: RecordWriter>(
        &self,
        writer: &W,
        target: &OutputTarget,
    ) -> Result<PathBuf> {
        let document = self.to_vcard()?;
        Ok(writer.write_record(target, &document)?)
    }
}

/// Reads business cards with an OCR engine and a field parser.
///
/// Holds no per-card state; one reader can serve any number of cards.
pub struct CardReader<E: OcrEngine> {
    engine: E,
    parser: CardParser,
}

impl<E: OcrEngine> CardReader<E> {
    /// Create a reader with the default parser.
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            parser: CardParser::new(),
        }
    }

    /// Set the parser.
    pub fn with_parser(mut self, parser: CardParser) -> Self {
        self.parser = parser;
        self
    }

    /// The OCR engine in use.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Scan a decoded image.
    pub fn scan_image(&self, image: &DynamicImage) -> Result<CardScan> {
        let ocr = self.engine.recognize(image)?;
        Ok(self.finish(ocr))
    }

    /// Scan an image file.
    pub fn scan_path(&self, path: &Path) -> Result<CardScan> {
        info!("Reading business card {}", path.display());
        let ocr = self.engine.recognize_path(path)?;
        Ok(self.finish(ocr))
    }

    /// Run extraction over text another engine already produced.
    pub fn scan_text(&self, text: &str) -> CardScan {
        self.finish(OcrResult::from_text(text, self.engine.name()))
    }

    fn finish(&self, ocr: OcrResult) -> CardScan {
        if ocr.is_blank() {
            warn!("{} found no text on the card", ocr.engine);
        }

        let extraction = self.parser.parse(&ocr.text);
        for warning in &extraction.warnings {
            warn!("{}", warning);
        }

        CardScan { ocr, extraction }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CardError, OcrError};
    use crate::models::contact::ContactField;
    use crate::storage::FileRecordWriter;
    use pretty_assertions::assert_eq;

    struct FixedText(&'static str);

    impl OcrEngine for FixedText {
        fn name(&self) -> &str {
            "fixed"
        }

        fn recognize(&self, image: &DynamicImage) -> std::result::Result<OcrResult, OcrError> {
            let mut result = OcrResult::from_text(self.0, self.name());
            result.image_size = (image.width(), image.height());
            Ok(result)
        }
    }

    struct Broken;

    impl OcrEngine for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn recognize(&self, _image: &DynamicImage) -> std::result::Result<OcrResult, OcrError> {
            Err(OcrError::EngineUnavailable("no engine".to_string()))
        }
    }

    const CARD: &str = "Jane Doe\nCTO\n+1-415-555-0100\njane@acme.com\nwww.acme.com";

    #[test]
    fn test_end_to_end_vcard() {
        let reader = CardReader::new(FixedText(CARD));
        let scan = reader.scan_image(&DynamicImage::new_rgb8(10, 6)).unwrap();

        assert_eq!(scan.ocr.image_size, (10, 6));
        assert_eq!(
            scan.to_vcard().unwrap(),
            "BEGIN:VCARD\n\
             VERSION:3.0\n\
             FN:Jane Doe\n\
             ORG:CTO\n\
             TEL:+1-415-555-0100\n\
             EMAIL:jane@acme.com\n\
             URL:www.acme.com\n\
             END:VCARD\n"
        );
    }

    #[test]
    fn test_ocr_failure_aborts_before_extraction() {
        let reader = CardReader::new(Broken);
        let err = reader
            .scan_image(&DynamicImage::new_rgb8(1, 1))
            .unwrap_err();
        assert!(matches!(err, CardError::Ocr(OcrError::EngineUnavailable(_))));
    }

    #[test]
    fn test_card_without_email_cannot_be_serialized() {
        let reader = CardReader::new(FixedText("Jane Doe\nCTO\n+1-415-555-0100\nwww.acme.com"));
        let scan = reader.scan_image(&DynamicImage::new_rgb8(1, 1)).unwrap();

        assert!(scan.fields().emails.is_empty());
        assert_eq!(
            scan.to_vcard(),
            Err(RecordError::MissingField(ContactField::Email))
        );
    }

    #[test]
    fn test_scan_text_and_custom_parser() {
        let reader = CardReader::new(Broken)
            .with_parser(CardParser::new().with_min_name_token_len(4));
        let scan = reader.scan_text(CARD);

        assert_eq!(scan.ocr.engine, "broken");
        assert_eq!(scan.fields().title, None);
        assert_eq!(scan.to_record().unwrap().organization, None);
    }

    #[test]
    fn test_scan_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("card.png");
        image::RgbImage::new(3, 2).save(&path).unwrap();

        let scan = CardReader::new(FixedText(CARD)).scan_path(&path).unwrap();
        assert_eq!(scan.ocr.image_size, (3, 2));
        assert_eq!(scan.fields().name.as_deref(), Some("Jane Doe"));
    }

    #[test]
    fn test_save_vcard_writes_record() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::new(dir.path(), "contact.vcf");
        let scan = CardReader::new(FixedText(CARD)).scan_text(CARD);

        let path = scan.save_vcard(&FileRecordWriter, &target).unwrap();

        assert_eq!(path, target.path());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), scan.to_vcard().unwrap());
    }

    #[test]
    fn test_save_vcard_missing_field_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = OutputTarget::new(dir.path(), "contact.vcf");
        let scan = CardReader::new(FixedText("")).scan_text("Jane Doe\nCTO");

        let err = scan.save_vcard(&FileRecordWriter, &target).unwrap_err();

        assert!(matches!(
            err,
            CardError::Record(RecordError::MissingField(ContactField::Email))
        ));
        assert!(!target.path().exists());
    }

    #[test]
    fn test_save_vcard_unwritable_target_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "file, not a directory").unwrap();
        let target = OutputTarget::new(blocker.join("nested"), "contact.vcf");
        let scan = CardReader::new(FixedText(CARD)).scan_text(CARD);

        let err = scan.save_vcard(&FileRecordWriter, &target).unwrap_err();
        assert!(matches!(err, CardError::Io(_)));
    }
}
