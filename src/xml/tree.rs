//! Eigener XML-Baum für Template-Bearbeitung.
//!
//! Die Templates (i3d-Szene, Placeable-XML, modDesc) werden als Baum geladen,
//! punktuell umgebaut (Splice, Platzhalter-Ersetzung) und wieder serialisiert.
//! quick-xml liefert die Events, der Baum selbst gehört uns.

use anyhow::{bail, Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// XML-Deklaration für i3d-Ausgaben (GIANTS erwartet Single-Byte-Encoding)
pub const XML_DECL_ISO_8859_1: &str = "<?xml version=\"1.0\" encoding=\"iso-8859-1\"?>";
/// XML-Deklaration für UTF-8-Ausgaben (Placeable-XML, modDesc)
pub const XML_DECL_UTF8: &str = "<?xml version=\"1.0\" encoding=\"utf-8\" standalone=\"no\"?>";

/// Ein Kind-Knoten im Baum
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    /// Element-Knoten
    Element(Element),
    /// Text-Knoten (entschärft, d.h. ohne XML-Escapes)
    Text(String),
}

/// Ein XML-Element mit Attributen und Kindern in Dokument-Reihenfolge
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    /// Tag-Name
    pub name: String,
    /// Attribute in Dokument-Reihenfolge
    pub attributes: Vec<(String, String)>,
    /// Kind-Knoten in Dokument-Reihenfolge
    pub children: Vec<XmlNode>,
}

impl Element {
    /// Erstellt ein leeres Element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Parst ein XML-Dokument und liefert das Wurzelelement.
    ///
    /// Kommentare und Processing-Instructions werden verworfen (die Templates
    /// enthalten keine, und ElementTree im alten Toolstack tat dasselbe).
    pub fn parse(xml: &str) -> Result<Element> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut buffer = Vec::new();
        let mut stack: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;

        loop {
            match reader.read_event_into(&mut buffer) {
                Ok(Event::Start(ref e)) => {
                    let element = element_from_start(&reader, e)?;
                    stack.push(element);
                }
                Ok(Event::Empty(ref e)) => {
                    let element = element_from_start(&reader, e)?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Text(e)) => {
                    let text = e.xml_content()?.into_owned();
                    if !text.is_empty() {
                        if let Some(parent) = stack.last_mut() {
                            parent.children.push(XmlNode::Text(text));
                        }
                    }
                }
                Ok(Event::End(_)) => {
                    let element = stack
                        .pop()
                        .context("Unbalanciertes XML: End-Tag ohne Start-Tag")?;
                    attach(&mut stack, &mut root, element)?;
                }
                Ok(Event::Eof) => break,
                Err(err) => return Err(err).context("Fehler beim Parsen des XML"),
                _ => {}
            }

            buffer.clear();
        }

        if !stack.is_empty() {
            bail!("Unbalanciertes XML: offene Elemente am Dateiende");
        }

        root.context("Kein Wurzelelement im XML gefunden")
    }

    /// Liefert den Wert eines Attributs
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Setzt ein Attribut (ersetzt einen vorhandenen Wert, sonst angehängt)
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(entry) = self.attributes.iter_mut().find(|(k, _)| k == key) {
            entry.1 = value;
        } else {
            self.attributes.push((key.to_string(), value));
        }
    }

    /// Gesamter Text-Inhalt (erster Text-Knoten)
    pub fn text(&self) -> Option<&str> {
        self.children.iter().find_map(|child| match child {
            XmlNode::Text(text) => Some(text.as_str()),
            XmlNode::Element(_) => None,
        })
    }

    /// Ersetzt alle Kinder durch einen einzelnen Text-Knoten
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(XmlNode::Text(text.into()));
    }

    /// Fügt ein Kind-Element am Ende an
    pub fn push_element(&mut self, element: Element) {
        self.children.push(XmlNode::Element(element));
    }

    /// Fügt ein Kind-Element an der angegebenen Position ein
    pub fn insert_element(&mut self, index: usize, element: Element) {
        self.children.insert(index, XmlNode::Element(element));
    }

    /// Erstes direktes Kind-Element mit dem angegebenen Tag-Namen
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == name)
    }

    /// Erstes direktes Kind-Element mit dem angegebenen Tag-Namen (mutabel)
    pub fn find_child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children.iter_mut().find_map(|child| match child {
            XmlNode::Element(el) if el.name == name => Some(el),
            _ => None,
        })
    }

    /// Entfernt das erste direkte Kind-Element mit dem Tag-Namen und gibt es zurück
    pub fn take_child(&mut self, name: &str) -> Option<Element> {
        let index = self.children.iter().position(|child| {
            matches!(child, XmlNode::Element(el) if el.name == name)
        })?;
        match self.children.remove(index) {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        }
    }

    /// Iterator über alle direkten Kind-Elemente
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|child| match child {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// true, wenn das Element mindestens ein Kind-Element hat
    pub fn has_element_children(&self) -> bool {
        self.child_elements().next().is_some()
    }

    /// Sucht rekursiv die erste TransformGroup mit dem angegebenen name-Attribut
    /// (Dokument-Reihenfolge, Tiefensuche).
    pub fn find_transform_group_mut(&mut self, group_name: &str) -> Option<&mut Element> {
        for child in &mut self.children {
            if let XmlNode::Element(el) = child {
                if el.name == "TransformGroup" && el.attr("name") == Some(group_name) {
                    return Some(el);
                }
                if let Some(found) = el.find_transform_group_mut(group_name) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Ersetzt das Token in allen Text-Knoten des Teilbaums (Substring-Ersetzung,
    /// auch mehrfach pro Knoten). Attributwerte bleiben unangetastet.
    /// Liefert die Anzahl betroffener Text-Knoten.
    pub fn replace_in_text(&mut self, token: &str, replacement: &str) -> usize {
        let mut count = 0;
        for child in &mut self.children {
            match child {
                XmlNode::Text(text) => {
                    if text.contains(token) {
                        *text = text.replace(token, replacement);
                        count += 1;
                    }
                }
                XmlNode::Element(el) => count += el.replace_in_text(token, replacement),
            }
        }
        count
    }

    /// Serialisiert den Baum mit 4-Leerzeichen-Einrückung
    pub fn to_xml_string(&self, declaration: &str) -> String {
        let mut output = String::new();
        output.push_str(declaration);
        output.push('\n');
        self.write_into(&mut output, 0);
        output
    }

    fn write_into(&self, output: &mut String, depth: usize) {
        let pad = "    ".repeat(depth);
        output.push_str(&pad);
        output.push('<');
        output.push_str(&self.name);

        for (key, value) in &self.attributes {
            output.push(' ');
            output.push_str(key);
            output.push_str("=\"");
            output.push_str(&escape_xml(value));
            output.push('"');
        }

        match self.children.as_slice() {
            [] => output.push_str("/>\n"),
            [XmlNode::Text(text)] => {
                output.push('>');
                output.push_str(&escape_xml(text));
                output.push_str("</");
                output.push_str(&self.name);
                output.push_str(">\n");
            }
            _ => {
                output.push_str(">\n");
                for child in &self.children {
                    match child {
                        XmlNode::Element(el) => el.write_into(output, depth + 1),
                        XmlNode::Text(text) => {
                            output.push_str(&pad);
                            output.push_str("    ");
                            output.push_str(&escape_xml(text));
                            output.push('\n');
                        }
                    }
                }
                output.push_str(&pad);
                output.push_str("</");
                output.push_str(&self.name);
                output.push_str(">\n");
            }
        }
    }
}

fn attach(stack: &mut Vec<Element>, root: &mut Option<Element>, element: Element) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
    } else if root.is_none() {
        *root = Some(element);
    } else {
        bail!("Mehrere Wurzelelemente im XML");
    }
    Ok(())
}

fn element_from_start<R>(reader: &Reader<R>, e: &BytesStart) -> Result<Element> {
    let name = reader.decoder().decode(e.name().as_ref())?.into_owned();
    let mut element = Element::new(name);

    for attr in e.attributes().with_checks(false) {
        let attr = attr?;
        let key = reader.decoder().decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        element.attributes.push((key, value));
    }

    Ok(element)
}

/// Escaped die fünf XML-Sonderzeichen
pub fn escape_xml(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Kodiert einen String als ISO-8859-1-Bytes.
///
/// Zeichen oberhalb von U+00FF sind nicht darstellbar und führen zu einem
/// Fehler statt stiller Ersetzung.
pub fn encode_latin1(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            let code_point = c as u32;
            if code_point <= 0xFF {
                Ok(code_point as u8)
            } else {
                bail!(
                    "Zeichen '{}' (U+{:04X}) ist nicht ISO-8859-1-kodierbar",
                    c,
                    code_point
                )
            }
        })
        .collect()
}
