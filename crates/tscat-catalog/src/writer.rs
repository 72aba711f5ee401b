//! `.ts` document writing
//!
//! Output follows the layout Qt Linguist tools produce: four-space
//! indentation, `type` only for non-final translations, numerus forms nested
//! inside their translation. Reading the output back yields an equal catalog.

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Catalog, Context, Location, Message, Translation};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;

const INDENT: &str = "    ";

// Characters XML 1.0 cannot carry as text; Qt writes them as <byte> elements.
fn needs_byte_element(c: char) -> bool {
    c < '\u{20}' && !matches!(c, '\t' | '\n' | '\r')
}

struct TsWriter {
    inner: Writer<Vec<u8>>,
}

impl TsWriter {
    fn new() -> Self {
        Self {
            inner: Writer::new(Vec::new()),
        }
    }

    fn event(&mut self, event: Event<'_>) -> CatalogResult<()> {
        self.inner
            .write_event(event)
            .map_err(|e| CatalogError::Write(e.to_string()))
    }

    fn newline(&mut self, depth: usize) -> CatalogResult<()> {
        let mut layout = String::from("\n");
        for _ in 0..depth {
            layout.push_str(INDENT);
        }
        self.event(Event::Text(BytesText::from_escaped(layout)))
    }

    fn open(&mut self, start: BytesStart<'_>) -> CatalogResult<()> {
        self.event(Event::Start(start))
    }

    fn close(&mut self, name: &str) -> CatalogResult<()> {
        self.event(Event::End(BytesEnd::new(name)))
    }

    fn text(&mut self, text: &str) -> CatalogResult<()> {
        let mut run_start = 0;
        for (offset, c) in text.char_indices() {
            if needs_byte_element(c) {
                if run_start < offset {
                    self.event(Event::Text(BytesText::new(&text[run_start..offset])))?;
                }
                let value = format!("x{:x}", u32::from(c));
                let byte = BytesStart::new("byte").with_attributes([("value", value.as_str())]);
                self.event(Event::Empty(byte))?;
                run_start = offset + c.len_utf8();
            }
        }
        if run_start < text.len() {
            self.event(Event::Text(BytesText::new(&text[run_start..])))?;
        }
        Ok(())
    }

    fn text_element(&mut self, depth: usize, name: &str, text: &str) -> CatalogResult<()> {
        self.newline(depth)?;
        self.open(BytesStart::new(name))?;
        self.text(text)?;
        self.close(name)
    }

    fn catalog(&mut self, catalog: &Catalog) -> CatalogResult<()> {
        self.event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        self.newline(0)?;
        self.event(Event::DocType(BytesText::from_escaped("TS")))?;
        self.newline(0)?;

        let mut root = BytesStart::new("TS");
        root.push_attribute(("version", catalog.version()));
        root.push_attribute(("language", catalog.language().as_str()));
        if let Some(source_language) = catalog.source_language() {
            root.push_attribute(("sourcelanguage", source_language.as_str()));
        }
        self.open(root)?;

        for context in catalog.contexts() {
            self.context(context)?;
        }

        self.newline(0)?;
        self.close("TS")?;
        self.newline(0)
    }

    fn context(&mut self, context: &Context) -> CatalogResult<()> {
        self.newline(0)?;
        self.open(BytesStart::new("context"))?;
        self.text_element(1, "name", context.name())?;
        if let Some(comment) = context.comment() {
            self.text_element(1, "comment", comment)?;
        }
        for message in context.messages() {
            self.message(message)?;
        }
        self.newline(0)?;
        self.close("context")
    }

    fn location(&mut self, location: &Location) -> CatalogResult<()> {
        let mut element = BytesStart::new("location");
        if let Some(filename) = &location.filename {
            element.push_attribute(("filename", filename.as_str()));
        }
        if let Some(line) = &location.line {
            element.push_attribute(("line", line.as_str()));
        }
        self.newline(2)?;
        self.event(Event::Empty(element))
    }

    fn message(&mut self, message: &Message) -> CatalogResult<()> {
        let mut start = BytesStart::new("message");
        if let Some(id) = message.message_id() {
            start.push_attribute(("id", id));
        }
        if message.is_numerus() {
            start.push_attribute(("numerus", "yes"));
        }
        self.newline(1)?;
        self.open(start)?;

        for location in message.locations() {
            self.location(location)?;
        }
        self.text_element(2, "source", message.source_text())?;
        if let Some(comment) = message.disambiguation() {
            self.text_element(2, "comment", comment)?;
        }
        if let Some(note) = message.extra_note() {
            self.text_element(2, "extracomment", note)?;
        }
        if let Some(note) = message.translator_note() {
            self.text_element(2, "translatorcomment", note)?;
        }

        let mut translation = BytesStart::new("translation");
        if let Some(status) = message.message_status().type_attribute() {
            translation.push_attribute(("type", status));
        }
        self.newline(2)?;
        self.open(translation)?;
        match message.translation() {
            Translation::Single(text) => self.text(text)?,
            Translation::Plural(forms) => {
                for form in forms {
                    self.text_element(3, "numerusform", form)?;
                }
                self.newline(2)?;
            }
        }
        self.close("translation")?;

        self.newline(1)?;
        self.close("message")
    }

    fn finish(self) -> CatalogResult<String> {
        String::from_utf8(self.inner.into_inner()).map_err(|e| CatalogError::Write(e.to_string()))
    }
}

impl Catalog {
    /// Serializes the catalog as a `.ts` document.
    pub fn to_ts_string(&self) -> CatalogResult<String> {
        let mut writer = TsWriter::new();
        writer.catalog(self)?;
        writer.finish()
    }

    /// Writes the catalog as a `.ts` document.
    pub fn write_to<W: Write>(&self, mut out: W) -> CatalogResult<()> {
        let document = self.to_ts_string()?;
        out.write_all(document.as_bytes())
            .map_err(|e| CatalogError::Write(e.to_string()))
    }

    /// Saves the catalog to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> CatalogResult<()> {
        let path = path.as_ref();
        fs::write(path, self.to_ts_string()?).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Saved catalog for {} to {:?}", self.language(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MessageStatus;
    use crate::parser::parse_str;
    use tscat_common::LanguageCode;

    fn sample() -> Catalog {
        let mut builder = Catalog::builder(LanguageCode::parse("hu").unwrap())
            .source_language(Some(LanguageCode::parse("en").unwrap()));
        builder
            .add_message(
                "UIMessageCenter",
                Message::new("Yes", "Igen").location(Location {
                    filename: Some("../src/UIMessageCenter.cpp".into()),
                    line: Some("141".into()),
                }),
            )
            .unwrap();
        builder
            .add_message(
                "UIGlobalSettingsProxy",
                Message::new("No proxy host is currently specified.", "")
                    .status(MessageStatus::Unfinished),
            )
            .unwrap();
        builder
            .add_message("UIWizard", Message::plural("%n file(s)", ["%n fájl"]))
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_layout() {
        let document = sample().to_ts_string().unwrap();
        let expected = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n\
<!DOCTYPE TS>\n\
<TS version=\"2.1\" language=\"hu\" sourcelanguage=\"en\">\n\
<context>\n\
\x20   <name>UIMessageCenter</name>\n\
\x20   <message>\n\
\x20       <location filename=\"../src/UIMessageCenter.cpp\" line=\"141\"/>\n\
\x20       <source>Yes</source>\n\
\x20       <translation>Igen</translation>\n\
\x20   </message>\n\
</context>\n\
<context>\n\
\x20   <name>UIGlobalSettingsProxy</name>\n\
\x20   <message>\n\
\x20       <source>No proxy host is currently specified.</source>\n\
\x20       <translation type=\"unfinished\"></translation>\n\
\x20   </message>\n\
</context>\n\
<context>\n\
\x20   <name>UIWizard</name>\n\
\x20   <message numerus=\"yes\">\n\
\x20       <source>%n file(s)</source>\n\
\x20       <translation>\n\
\x20           <numerusform>%n fájl</numerusform>\n\
\x20       </translation>\n\
\x20   </message>\n\
</context>\n\
</TS>\n";
        assert_eq!(document, expected);
    }

    #[test]
    fn test_round_trip() {
        let catalog = sample();
        let reparsed = parse_str(&catalog.to_ts_string().unwrap()).unwrap();
        assert_eq!(reparsed, catalog);
    }

    #[test]
    fn test_escapes_reserved_characters() {
        let mut builder = Catalog::builder(LanguageCode::parse("hu").unwrap());
        builder
            .add_message("A", Message::new("<b>Save</b> & \"quit\"", "<b>Mentés</b> & 'kilépés'"))
            .unwrap();
        let catalog = builder.build();

        let document = catalog.to_ts_string().unwrap();
        assert!(document.contains("&lt;b&gt;Save&lt;/b&gt; &amp;"));
        assert!(!document.contains("<b>"));
        assert_eq!(parse_str(&document).unwrap(), catalog);
    }

    #[test]
    fn test_control_characters_become_byte_elements() {
        let mut builder = Catalog::builder(LanguageCode::parse("hu").unwrap());
        builder
            .add_message("A", Message::new("bell\u{7}", "csengő\u{7}\tvége"))
            .unwrap();
        let catalog = builder.build();

        let document = catalog.to_ts_string().unwrap();
        assert!(document.contains("<source>bell<byte value=\"x7\"/></source>"));
        assert!(document.contains("csengő<byte value=\"x7\"/>\tvége"));
        assert_eq!(parse_str(&document).unwrap(), catalog);
    }

    #[test]
    fn test_write_to() {
        let mut out = Vec::new();
        sample().write_to(&mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().starts_with("<?xml"));
    }
}
