//! EPUB container access: ZIP archive, `container.xml` and the OPF package.

use std::io::{Cursor, Read};

use percent_encoding::percent_decode_str;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::detect::detect_format_from_bytes;
use crate::error::{Error, Result};
use crate::model::{PackageMetadata, TocEntry};

use super::toc;

/// Location of the container descriptor inside every EPUB.
pub const CONTAINER_PATH: &str = "META-INF/container.xml";

const NCX_MEDIA_TYPE: &str = "application/x-dtbncx+xml";

/// An entry of the OPF manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    /// Manifest id
    pub id: String,
    /// Href as written in the OPF
    pub href: String,
    /// Href resolved to an archive path
    pub path: String,
    /// Declared media type
    pub media_type: String,
    /// Space-separated `properties` values
    pub properties: Vec<String>,
}

impl ManifestItem {
    /// Whether the item is an (X)HTML content document.
    pub fn is_document(&self) -> bool {
        matches!(
            self.media_type.as_str(),
            "application/xhtml+xml" | "text/html" | "application/html"
        )
    }

    /// Check for a manifest property such as `nav`.
    pub fn has_property(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }
}

/// An entry of the OPF spine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpineItem {
    /// Manifest id this entry points to
    pub idref: String,
    /// `false` when the item is marked `linear="no"`
    pub linear: bool,
}

/// Parsed OPF package document.
#[derive(Debug, Clone, Default)]
pub struct OpfPackage {
    /// Dublin Core metadata
    pub metadata: PackageMetadata,
    /// Manifest items in declaration order
    pub manifest: Vec<ManifestItem>,
    /// Reading order
    pub spine: Vec<SpineItem>,
    /// Manifest id of the NCX named by `spine@toc`
    pub toc_id: Option<String>,
}

/// An opened EPUB held entirely in memory.
pub struct EpubContainer {
    archive: ZipArchive<Cursor<Vec<u8>>>,
    opf_path: String,
    package: OpfPackage,
}

impl EpubContainer {
    /// Open an EPUB from its raw bytes.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let format = detect_format_from_bytes(&data)?;
        if !format.mimetype_declared {
            log::debug!("EPUB container does not start with a mimetype entry");
        }

        let mut archive = ZipArchive::new(Cursor::new(data))?;

        let container_xml = read_archive_text(&mut archive, CONTAINER_PATH)?;
        let opf_path = parse_container_xml(&container_xml)?;

        let opf = read_archive_text(&mut archive, &opf_path)?;
        let package = parse_opf(&opf, parent_dir(&opf_path))?;

        log::debug!(
            "opened EPUB package {} ({} manifest items, {} spine items)",
            opf_path,
            package.manifest.len(),
            package.spine.len()
        );

        Ok(Self {
            archive,
            opf_path,
            package,
        })
    }

    /// Archive path of the OPF package document.
    pub fn opf_path(&self) -> &str {
        &self.opf_path
    }

    /// Package metadata.
    pub fn metadata(&self) -> &PackageMetadata {
        &self.package.metadata
    }

    /// Manifest items in declaration order.
    pub fn manifest(&self) -> &[ManifestItem] {
        &self.package.manifest
    }

    /// Spine entries in reading order.
    pub fn spine(&self) -> &[SpineItem] {
        &self.package.spine
    }

    /// Look up a manifest item by id.
    pub fn manifest_item(&self, id: &str) -> Option<&ManifestItem> {
        self.package.manifest.iter().find(|item| item.id == id)
    }

    /// Content documents in spine order.
    ///
    /// Spine entries that point to missing manifest ids or to non-HTML
    /// resources are left out.
    pub fn documents(&self) -> Vec<ManifestItem> {
        let mut documents = Vec::new();
        for spine_item in &self.package.spine {
            match self.manifest_item(&spine_item.idref) {
                Some(item) if item.is_document() => documents.push(item.clone()),
                Some(item) => {
                    log::debug!("skipping non-document spine item {}", item.path);
                }
                None => {
                    log::warn!("spine references unknown manifest id {}", spine_item.idref);
                }
            }
        }
        documents
    }

    /// Read an archive entry as text.
    pub fn read_text(&mut self, path: &str) -> Result<String> {
        read_archive_text(&mut self.archive, path)
    }

    /// Read the table of contents.
    ///
    /// The NCX named by the spine wins, then any NCX in the manifest, then the
    /// EPUB 3 navigation document. A book without any of them has an empty
    /// table of contents.
    pub fn read_toc(&mut self) -> Result<Vec<TocEntry>> {
        if let Some(ncx_path) = self.ncx_path() {
            let content = self.read_text(&ncx_path)?;
            return toc::parse_ncx(&content, parent_dir(&ncx_path));
        }

        let nav_path = self
            .package
            .manifest
            .iter()
            .find(|item| item.has_property("nav"))
            .map(|item| item.path.clone());
        if let Some(nav_path) = nav_path {
            let content = self.read_text(&nav_path)?;
            return Ok(toc::parse_nav(&content, parent_dir(&nav_path)));
        }

        log::warn!("EPUB has no table of contents; sections will be empty");
        Ok(Vec::new())
    }

    fn ncx_path(&self) -> Option<String> {
        let from_spine = self
            .package
            .toc_id
            .as_deref()
            .and_then(|id| self.manifest_item(id));
        from_spine
            .or_else(|| {
                self.package
                    .manifest
                    .iter()
                    .find(|item| item.media_type == NCX_MEDIA_TYPE)
            })
            .map(|item| item.path.clone())
    }
}

fn read_archive_bytes(archive: &mut ZipArchive<Cursor<Vec<u8>>>, path: &str) -> Result<Vec<u8>> {
    let mut entry = match archive.by_name(path) {
        Ok(entry) => entry,
        Err(ZipError::FileNotFound) => return Err(Error::MissingEntry(path.to_string())),
        Err(e) => return Err(e.into()),
    };
    let mut data = Vec::new();
    entry.read_to_end(&mut data)?;
    Ok(data)
}

fn read_archive_text(archive: &mut ZipArchive<Cursor<Vec<u8>>>, path: &str) -> Result<String> {
    let data = read_archive_bytes(archive, path)?;
    Ok(decode_text(&data))
}

/// Decode entry bytes as UTF-8, dropping a BOM and replacing invalid sequences.
pub fn decode_text(data: &[u8]) -> String {
    String::from_utf8_lossy(strip_bom(data)).into_owned()
}

/// Strip UTF-8 BOM if present.
pub fn strip_bom(data: &[u8]) -> &[u8] {
    if data.starts_with(&[0xEF, 0xBB, 0xBF]) {
        &data[3..]
    } else {
        data
    }
}

/// Parse `META-INF/container.xml` to find the OPF path.
pub fn parse_container_xml(content: &str) -> Result<String> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    loop {
        match reader.read_event()? {
            Event::Start(e) | Event::Empty(e) if e.local_name().as_ref() == b"rootfile" => {
                if let Some(path) = attribute(&e, b"full-path")? {
                    return Ok(path);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Err(Error::InvalidEpub(
        "no rootfile found in container.xml".to_string(),
    ))
}

#[derive(Clone, Copy)]
enum DcField {
    Title,
    Creator,
    Language,
    Identifier,
}

/// Parse the OPF package document. Hrefs resolve against `opf_dir`.
pub fn parse_opf(content: &str, opf_dir: &str) -> Result<OpfPackage> {
    let mut reader = Reader::from_str(content);
    reader.config_mut().trim_text(true);

    let mut package = OpfPackage::default();
    let mut in_metadata = false;
    let mut field: Option<DcField> = None;
    let mut text = String::new();
    let mut saw_package = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"package" => {
                    saw_package = true;
                    package.metadata.version = attribute(&e, b"version")?;
                }
                b"metadata" => in_metadata = true,
                b"title" if in_metadata => field = Some(DcField::Title),
                b"creator" if in_metadata => field = Some(DcField::Creator),
                b"language" if in_metadata => field = Some(DcField::Language),
                b"identifier" if in_metadata => field = Some(DcField::Identifier),
                b"spine" => package.toc_id = attribute(&e, b"toc")?,
                b"item" => push_manifest_item(&mut package, &e, opf_dir)?,
                b"itemref" => push_spine_item(&mut package, &e)?,
                _ => {}
            },
            Event::Empty(e) => match e.local_name().as_ref() {
                b"item" => push_manifest_item(&mut package, &e, opf_dir)?,
                b"itemref" => push_spine_item(&mut package, &e)?,
                b"spine" => package.toc_id = attribute(&e, b"toc")?,
                _ => {}
            },
            Event::Text(e) if field.is_some() => text.push_str(&text_content(&e)),
            Event::CData(e) if field.is_some() => {
                text.push_str(&String::from_utf8_lossy(&e));
            }
            Event::End(e) => {
                if e.local_name().as_ref() == b"metadata" {
                    in_metadata = false;
                }
                if let Some(current) = field.take() {
                    let value = text.trim().to_string();
                    text.clear();
                    if !value.is_empty() {
                        store_dc_field(&mut package.metadata, current, value);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_package {
        return Err(Error::InvalidEpub(
            "OPF document has no package element".to_string(),
        ));
    }

    Ok(package)
}

fn store_dc_field(metadata: &mut PackageMetadata, field: DcField, value: String) {
    match field {
        DcField::Title => {
            if metadata.title.is_none() {
                metadata.title = Some(value);
            }
        }
        DcField::Creator => metadata.creators.push(value),
        DcField::Language => {
            if metadata.language.is_none() {
                metadata.language = Some(value);
            }
        }
        DcField::Identifier => {
            if metadata.identifier.is_none() {
                metadata.identifier = Some(value);
            }
        }
    }
}

fn push_manifest_item(package: &mut OpfPackage, e: &BytesStart<'_>, opf_dir: &str) -> Result<()> {
    let id = attribute(e, b"id")?.unwrap_or_default();
    let href = attribute(e, b"href")?.unwrap_or_default();
    if id.is_empty() || href.is_empty() {
        log::debug!("ignoring manifest item without id or href");
        return Ok(());
    }

    let media_type = attribute(e, b"media-type")?.unwrap_or_default();
    let properties = attribute(e, b"properties")?
        .map(|p| p.split_ascii_whitespace().map(str::to_string).collect())
        .unwrap_or_default();

    package.manifest.push(ManifestItem {
        path: resolve_href(opf_dir, &href),
        id,
        href,
        media_type,
        properties,
    });
    Ok(())
}

fn push_spine_item(package: &mut OpfPackage, e: &BytesStart<'_>) -> Result<()> {
    if let Some(idref) = attribute(e, b"idref")? {
        let linear = attribute(e, b"linear")?.map_or(true, |v| v != "no");
        package.spine.push(SpineItem { idref, linear });
    }
    Ok(())
}

/// Unescaped value of the attribute with the given local name.
pub(crate) fn attribute(e: &BytesStart<'_>, name: &[u8]) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.local_name().as_ref() == name {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

/// Unescaped text, falling back to the raw bytes on unknown entities.
pub(crate) fn text_content(e: &BytesText<'_>) -> String {
    match e.unescape() {
        Ok(text) => text.into_owned(),
        Err(_) => String::from_utf8_lossy(e).into_owned(),
    }
}

/// Directory part of an archive path (`""` at the root).
pub fn parent_dir(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[..pos],
        None => "",
    }
}

/// Resolve an href against a base directory into a normalized archive path.
///
/// The href is percent-decoded and `.` / `..` segments are collapsed. A
/// `#fragment` is preserved.
pub fn resolve_href(base_dir: &str, href: &str) -> String {
    let (path_part, fragment) = match href.find('#') {
        Some(pos) => (&href[..pos], Some(&href[pos + 1..])),
        None => (href, None),
    };
    let decoded = percent_decode_str(path_part).decode_utf8_lossy();

    let mut segments: Vec<&str> = Vec::new();
    if !decoded.starts_with('/') {
        segments.extend(base_dir.split('/').filter(|s| !s.is_empty()));
    }
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }

    let mut resolved = segments.join("/");
    if let Some(fragment) = fragment {
        resolved.push('#');
        resolved.push_str(fragment);
    }
    resolved
}
