//! `.ts` document parsing
//!
//! The parser walks quick-xml events top-down and builds the catalog in one
//! pass. Any violation of the grammar rejects the whole document; there is
//! no partial catalog.

use crate::error::{CatalogError, CatalogResult};
use crate::model::{Catalog, CatalogBuilder, Context, Location, Message, MessageStatus, Translation};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};
use tscat_common::LanguageCode;

/// Parses a catalog from a string.
pub fn parse_str(input: &str) -> CatalogResult<Catalog> {
    TsParser::new(input).parse_document()
}

/// Parses a catalog from any reader.
pub fn parse_reader<R: Read>(mut reader: R) -> CatalogResult<Catalog> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|source| CatalogError::Io {
            path: "<stream>".into(),
            source,
        })?;
    parse_str(&decode_utf8(bytes)?)
}

/// Catalogs are UTF-8; anything else is a malformed document, not an I/O
/// failure.
fn decode_utf8(bytes: Vec<u8>) -> CatalogResult<String> {
    String::from_utf8(bytes).map_err(|e| CatalogError::Structural {
        context: None,
        position: e.utf8_error().valid_up_to(),
        reason: format!("document is not valid UTF-8: {}", e.utf8_error()),
    })
}

impl Catalog {
    /// Loads and parses a catalog file.
    pub fn load<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        debug!("Loading catalog file: {:?}", path);

        let bytes = fs::read(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = parse_str(&decode_utf8(bytes)?)?;
        info!("Loaded catalog {:?}: {}", path, catalog.stats());
        Ok(catalog)
    }
}

impl FromStr for Catalog {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_str(s)
    }
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}

// Qt's extension namespace; such elements carry tool data we do not model.
fn is_extension(name: &[u8]) -> bool {
    name.starts_with(b"extra-")
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn describe(event: &Event<'_>) -> String {
    match event {
        Event::Start(start) => format!("element <{}>", element_name(start)),
        Event::Empty(start) => format!("element <{}/>", element_name(start)),
        Event::End(end) => format!("end tag </{}>", String::from_utf8_lossy(end.name().as_ref())),
        Event::Text(_) => "text".to_string(),
        Event::CData(_) => "CDATA section".to_string(),
        Event::Decl(_) => "XML declaration".to_string(),
        Event::DocType(_) => "DOCTYPE".to_string(),
        Event::PI(_) => "processing instruction".to_string(),
        Event::Comment(_) => "comment".to_string(),
        Event::Eof => "end of document".to_string(),
    }
}

/// Decodes a `<byte value="..."/>` value: `x41`, `0x41` or `65`.
fn decode_byte(value: &str) -> Option<char> {
    let code = if let Some(hex) = value.strip_prefix("0x").or_else(|| value.strip_prefix('x')) {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        value.parse().ok()?
    };
    char::from_u32(code).filter(|c| *c != '\0')
}

struct TsParser<'a> {
    reader: Reader<&'a [u8]>,
    context: Option<String>,
}

impl<'a> TsParser<'a> {
    fn new(input: &'a str) -> Self {
        let mut reader = Reader::from_str(input);
        reader.trim_text(false);
        reader.check_end_names(true);
        Self {
            reader,
            context: None,
        }
    }

    fn structural(&self, reason: impl Into<String>) -> CatalogError {
        CatalogError::Structural {
            context: self.context.clone(),
            position: self.reader.buffer_position(),
            reason: reason.into(),
        }
    }

    fn unexpected(&self, event: &Event<'_>, inside: &str) -> CatalogError {
        self.structural(format!("unexpected {} inside <{inside}>", describe(event)))
    }

    fn unexpected_element(&self, start: &BytesStart<'_>, inside: &str) -> CatalogError {
        self.structural(format!(
            "unexpected element <{}> inside <{inside}>",
            element_name(start)
        ))
    }

    fn next(&mut self) -> CatalogResult<Event<'a>> {
        self.reader
            .read_event()
            .map_err(|e| self.structural(e.to_string()))
    }

    fn attribute(&self, start: &BytesStart<'_>, name: &str) -> CatalogResult<Option<String>> {
        let attribute = start
            .try_get_attribute(name)
            .map_err(|e| self.structural(e.to_string()))?;

        attribute
            .map(|attribute| {
                attribute
                    .unescape_value()
                    .map(|value| value.into_owned())
                    .map_err(|e| self.structural(e.to_string()))
            })
            .transpose()
    }

    fn skip(&mut self, start: &BytesStart<'_>) -> CatalogResult<()> {
        debug!("Skipping element <{}>", element_name(start));
        self.reader
            .read_to_end(start.name())
            .map_err(|e| self.structural(e.to_string()))?;
        Ok(())
    }

    fn parse_document(mut self) -> CatalogResult<Catalog> {
        loop {
            match self.next()? {
                Event::Decl(_) | Event::DocType(_) | Event::Comment(_) | Event::PI(_) => {}
                Event::Text(text) if is_blank(&text) => {}
                Event::Start(start) if start.name().as_ref() == b"TS" => {
                    let builder = self.parse_header(&start)?;
                    let catalog = self.parse_body(builder)?;
                    self.expect_end_of_document()?;
                    return Ok(catalog);
                }
                Event::Empty(start) if start.name().as_ref() == b"TS" => {
                    let catalog = self.parse_header(&start)?.build();
                    self.expect_end_of_document()?;
                    return Ok(catalog);
                }
                Event::Eof => return Err(self.structural("document has no <TS> root element")),
                other => {
                    return Err(self.structural(format!(
                        "unexpected {} before the <TS> root element",
                        describe(&other)
                    )))
                }
            }
        }
    }

    fn parse_header(&self, start: &BytesStart<'_>) -> CatalogResult<CatalogBuilder> {
        let code = self
            .attribute(start, "language")?
            .ok_or_else(|| self.structural("<TS> has no language attribute"))?;
        let language = LanguageCode::parse(&code)
            .map_err(|_| CatalogError::InvalidLanguage { code: code.clone() })?;

        let source_language = self
            .attribute(start, "sourcelanguage")?
            .filter(|code| !code.is_empty())
            .map(|code| {
                LanguageCode::parse(&code).map_err(|_| CatalogError::InvalidLanguage { code })
            })
            .transpose()?;

        let mut builder = Catalog::builder(language).source_language(source_language);
        if let Some(version) = self.attribute(start, "version")? {
            builder = builder.version(version);
        }

        debug!("Parsing catalog for language {:?}", code);
        Ok(builder)
    }

    fn parse_body(&mut self, mut builder: CatalogBuilder) -> CatalogResult<Catalog> {
        loop {
            match self.next()? {
                Event::Start(start) => match start.name().as_ref() {
                    b"context" => {
                        let context = self.parse_context()?;
                        builder.add_context(context)?;
                        self.context = None;
                    }
                    b"defaultcodec" | b"dependencies" => self.skip(&start)?,
                    name if is_extension(name) => self.skip(&start)?,
                    _ => return Err(self.unexpected_element(&start, "TS")),
                },
                Event::Empty(start) => match start.name().as_ref() {
                    b"defaultcodec" | b"dependencies" => {}
                    name if is_extension(name) => {}
                    _ => return Err(self.unexpected_element(&start, "TS")),
                },
                Event::End(_) => return Ok(builder.build()),
                Event::Text(text) if is_blank(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                Event::Eof => return Err(self.structural("<TS> is not closed")),
                other => return Err(self.unexpected(&other, "TS")),
            }
        }
    }

    fn expect_end_of_document(&mut self) -> CatalogResult<()> {
        loop {
            match self.next()? {
                Event::Eof => return Ok(()),
                Event::Text(text) if is_blank(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                other => {
                    return Err(self.structural(format!(
                        "unexpected {} after the <TS> root element",
                        describe(&other)
                    )))
                }
            }
        }
    }

    fn parse_context(&mut self) -> CatalogResult<Context> {
        let mut name = None;
        let mut comment = None;
        let mut messages = Vec::new();

        loop {
            match self.next()? {
                Event::Start(start) => match start.name().as_ref() {
                    b"name" => {
                        let text = self.read_text("name")?;
                        debug!("Parsing context {:?}", text);
                        self.context = Some(text.clone());
                        name = Some(text);
                    }
                    b"comment" => comment = Some(self.read_text("comment")?),
                    b"message" => messages.push(self.parse_message(&start)?),
                    name if is_extension(name) => self.skip(&start)?,
                    _ => return Err(self.unexpected_element(&start, "context")),
                },
                Event::Empty(start) => match start.name().as_ref() {
                    b"name" => {
                        self.context = Some(String::new());
                        name = Some(String::new());
                    }
                    b"comment" => {}
                    name if is_extension(name) => {}
                    _ => return Err(self.unexpected_element(&start, "context")),
                },
                Event::End(_) => break,
                Event::Text(text) if is_blank(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                Event::Eof => return Err(self.structural("<context> is not closed")),
                other => return Err(self.unexpected(&other, "context")),
            }
        }

        let name = name.ok_or_else(|| self.structural("<context> has no <name>"))?;
        let mut context = Context::new(name).with_comment(comment);
        for message in messages {
            context.push(message)?;
        }
        Ok(context)
    }

    fn parse_message(&mut self, start: &BytesStart<'_>) -> CatalogResult<Message> {
        let numerus = self.attribute(start, "numerus")?.as_deref() == Some("yes");
        let id = self.attribute(start, "id")?;

        let mut source = None;
        let mut comment = None;
        let mut extra_comment = None;
        let mut translator_comment = None;
        let mut locations = Vec::new();
        let mut translation = None;

        loop {
            match self.next()? {
                Event::Start(child) => match child.name().as_ref() {
                    b"source" => {
                        self.ensure_single(source.is_some(), "source")?;
                        source = Some(self.read_text("source")?);
                    }
                    b"comment" => {
                        self.ensure_single(comment.is_some(), "comment")?;
                        comment = Some(self.read_text("comment")?);
                    }
                    b"extracomment" => extra_comment = Some(self.read_text("extracomment")?),
                    b"translatorcomment" => {
                        translator_comment = Some(self.read_text("translatorcomment")?);
                    }
                    b"translation" => {
                        self.ensure_single(translation.is_some(), "translation")?;
                        let status = self.status(&child)?;
                        let text = if numerus {
                            Translation::Plural(self.read_numerus_forms()?)
                        } else {
                            Translation::Single(self.read_text("translation")?)
                        };
                        translation = Some((text, status));
                    }
                    b"location" => {
                        locations.push(self.location(&child)?);
                        self.skip(&child)?;
                    }
                    b"oldsource" | b"oldcomment" | b"userdata" => self.skip(&child)?,
                    name if is_extension(name) => self.skip(&child)?,
                    _ => return Err(self.unexpected_element(&child, "message")),
                },
                Event::Empty(child) => match child.name().as_ref() {
                    b"source" => {
                        self.ensure_single(source.is_some(), "source")?;
                        source = Some(String::new());
                    }
                    b"location" => locations.push(self.location(&child)?),
                    b"translation" => {
                        self.ensure_single(translation.is_some(), "translation")?;
                        let status = self.status(&child)?;
                        let text = if numerus {
                            Translation::Plural(Vec::new())
                        } else {
                            Translation::Single(String::new())
                        };
                        translation = Some((text, status));
                    }
                    b"comment" | b"extracomment" | b"translatorcomment" => {}
                    b"oldsource" | b"oldcomment" | b"userdata" => {}
                    name if is_extension(name) => {}
                    _ => return Err(self.unexpected_element(&child, "message")),
                },
                Event::End(_) => break,
                Event::Text(text) if is_blank(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                Event::Eof => return Err(self.structural("<message> is not closed")),
                other => return Err(self.unexpected(&other, "message")),
            }
        }

        let source = source.ok_or_else(|| self.structural("<message> has no <source>"))?;
        let (translation, status) = translation.ok_or_else(|| {
            self.structural(format!("message {source:?} has no <translation>"))
        })?;

        let mut message = Message::with_translation(source, translation)
            .status(status)
            .id(id)
            .comment(comment)
            .extra_comment(extra_comment)
            .translator_comment(translator_comment);
        for location in locations {
            message = message.location(location);
        }
        Ok(message)
    }

    fn ensure_single(&self, seen: bool, element: &str) -> CatalogResult<()> {
        if seen {
            return Err(self.structural(format!("<message> has more than one <{element}>")));
        }
        Ok(())
    }

    fn status(&self, start: &BytesStart<'_>) -> CatalogResult<MessageStatus> {
        let value = self.attribute(start, "type")?;
        MessageStatus::from_type_attribute(value.as_deref()).ok_or_else(|| {
            self.structural(format!(
                "unknown translation type {:?}",
                value.unwrap_or_default()
            ))
        })
    }

    fn location(&self, start: &BytesStart<'_>) -> CatalogResult<Location> {
        Ok(Location {
            filename: self.attribute(start, "filename")?,
            line: self.attribute(start, "line")?,
        })
    }

    fn read_numerus_forms(&mut self) -> CatalogResult<Vec<String>> {
        let mut forms = Vec::new();
        loop {
            match self.next()? {
                Event::Start(start) if start.name().as_ref() == b"numerusform" => {
                    forms.push(self.read_text("numerusform")?);
                }
                Event::Empty(start) if start.name().as_ref() == b"numerusform" => {
                    forms.push(String::new());
                }
                Event::End(_) => return Ok(forms),
                Event::Text(text) if is_blank(&text) => {}
                Event::Comment(_) | Event::PI(_) => {}
                Event::Eof => return Err(self.structural("<translation> is not closed")),
                other => return Err(self.unexpected(&other, "translation")),
            }
        }
    }

    /// Reads the text content of the element just opened, up to its end tag.
    fn read_text(&mut self, element: &str) -> CatalogResult<String> {
        let mut text = String::new();
        loop {
            match self.next()? {
                Event::Text(chunk) => {
                    let unescaped = chunk
                        .unescape()
                        .map_err(|e| self.structural(e.to_string()))?;
                    text.push_str(&unescaped);
                }
                Event::CData(chunk) => {
                    let raw = std::str::from_utf8(&chunk)
                        .map_err(|e| self.structural(e.to_string()))?;
                    text.push_str(raw);
                }
                Event::Empty(start) if start.name().as_ref() == b"byte" => {
                    let value = self.attribute(&start, "value")?.unwrap_or_default();
                    let decoded = decode_byte(&value).ok_or_else(|| {
                        self.structural(format!("invalid <byte> value {value:?}"))
                    })?;
                    text.push(decoded);
                }
                Event::Comment(_) => {}
                Event::End(_) => return Ok(text),
                Event::Eof => return Err(self.structural(format!("<{element}> is not closed"))),
                other => return Err(self.unexpected(&other, element)),
            }
        }
    }
}
