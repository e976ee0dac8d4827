//! Synthetic EPUB fixtures shared by the integration tests.

#![allow(dead_code)]

use std::io::{Cursor, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const CONTAINER_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<container version="1.0" xmlns="urn:oasis:names:tc:opendocument:xmlns:container">
  <rootfiles>
    <rootfile full-path="OEBPS/content.opf" media-type="application/oebps-package+xml"/>
  </rootfiles>
</container>"#;

/// Section titles that align with a content document, in reading order.
pub const ALIGNED_SECTIONS: [&str; 5] = [
    "CHAPTER I THE SUN-SEEKER",
    "CHAPTER II RINKS AND SKATERS",
    "CHAPTER III TOBOGGANING",
    "CHAPTER IV ICE-HOCKEY",
    "CHAPTER VI NOTES ON THE WINTER RESORTS",
];

/// The TOC entry whose target is not in the spine.
pub const UNALIGNED_SECTION: &str = "CHAPTER V SKI-ING";

/// The TOC entry that shares its document with an earlier entry.
pub const SHADOWED_SECTION: &str = "DAVOS AND ST. MORITZ";

/// Write archive entries in order; the first one is stored uncompressed.
pub fn build_zip(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let stored = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let deflated = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (i, (name, content)) in entries.iter().enumerate() {
        let options = if i == 0 { stored } else { deflated };
        zip.start_file(*name, options).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }

    zip.finish().unwrap().into_inner()
}

fn chapter(title: &str, body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<!DOCTYPE html>
<html xmlns="http://www.w3.org/1999/xhtml">
<head>
  <title>{title}</title>
  <link rel="stylesheet" type="text/css" href="../style.css"/>
</head>
<body>
{body}
</body>
</html>"#
    )
}

const OPF: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0" unique-identifier="bookid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:opf="http://www.idpf.org/2007/opf">
    <dc:title>Winter Sports in Switzerland</dc:title>
    <dc:creator opf:role="aut">E. F. Benson</dc:creator>
    <dc:language>en</dc:language>
    <dc:identifier id="bookid">http://www.gutenberg.org/ebooks/00000</dc:identifier>
  </metadata>
  <manifest>
    <item id="ncx" href="toc.ncx" media-type="application/x-dtbncx+xml"/>
    <item id="css" href="style.css" media-type="text/css"/>
    <item id="cover" href="text/cover.xhtml" media-type="application/xhtml+xml"/>
    <item id="ch01" href="text/ch01.xhtml" media-type="application/xhtml+xml"/>
    <item id="ch02" href="text/ch02.xhtml" media-type="application/xhtml+xml"/>
    <item id="ch03" href="text/ch03.xhtml" media-type="application/xhtml+xml"/>
    <item id="ch04" href="text/ch04.xhtml" media-type="application/xhtml+xml"/>
    <item id="ch06" href="text/ch06.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine toc="ncx">
    <itemref idref="cover"/>
    <itemref idref="ch01"/>
    <itemref idref="ch02"/>
    <itemref idref="ch03"/>
    <itemref idref="ch04"/>
    <itemref idref="ch06"/>
  </spine>
</package>"#;

const NCX: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<ncx xmlns="http://www.daisy.org/z3986/2005/ncx/" version="2005-1">
  <head><meta name="dtb:uid" content="http://www.gutenberg.org/ebooks/00000"/></head>
  <docTitle><text>Winter Sports in Switzerland</text></docTitle>
  <navMap>
    <navPoint id="np-1" playOrder="1">
      <navLabel><text>CHAPTER I THE SUN-SEEKER</text></navLabel>
      <content src="text/ch01.xhtml#pgepubid00001"/>
    </navPoint>
    <navPoint id="np-2" playOrder="2">
      <navLabel><text>CHAPTER II RINKS AND SKATERS</text></navLabel>
      <content src="text/ch02.xhtml"/>
    </navPoint>
    <navPoint id="np-3" playOrder="3">
      <navLabel><text>CHAPTER III TOBOGGANING</text></navLabel>
      <content src="text/ch03.xhtml"/>
    </navPoint>
    <navPoint id="np-4" playOrder="4">
      <navLabel><text>CHAPTER IV ICE-HOCKEY</text></navLabel>
      <content src="text/ch04.xhtml"/>
    </navPoint>
    <navPoint id="np-5" playOrder="5">
      <navLabel><text>CHAPTER V SKI-ING</text></navLabel>
      <content src="text/ch05.xhtml"/>
    </navPoint>
    <navPoint id="np-6" playOrder="6">
      <navLabel><text>CHAPTER VI NOTES ON THE WINTER RESORTS</text></navLabel>
      <content src="text/ch06.xhtml"/>
      <navPoint id="np-7" playOrder="7">
        <navLabel><text>DAVOS AND ST. MORITZ</text></navLabel>
        <content src="text/ch06.xhtml#davos"/>
      </navPoint>
    </navPoint>
  </navMap>
</ncx>"#;

/// An EPUB 2 book with an NCX table of contents.
///
/// The cover precedes every TOC entry, chapter V is listed in the TOC but
/// missing from the spine, and chapter VI has a nested entry pointing into
/// the same document.
pub fn winter_sports_epub() -> Vec<u8> {
    let cover = chapter(
        "Winter Sports in Switzerland",
        r#"<div class="titlepage">
  <h1>WINTER SPORTS IN SWITZERLAND</h1>
  <p class="author">By E. F. Benson</p>
</div>
<p>The Project Gutenberg eBook of Winter Sports in Switzerland, a book about the pleasures of the snow.</p>"#,
    );
    let ch01 = chapter(
        "Chapter I",
        r#"<h2 id="pgepubid00001">CHAPTER I<br/>THE SUN-SEEKER</h2>
<p>The sun-seeker goes to Switzerland in search of warmth and light, and he finds them there in abundance.</p>
<p>He sits on the terrace of his hotel and watches the <i>skaters</i> below.</p>"#,
    );
    let ch02 = chapter(
        "Chapter II",
        r#"<h2>CHAPTER II<br/>RINKS AND SKATERS</h2>
<p>Skating is the most graceful of all the sports that the winter has to offer.</p>
<ul>
  <li>Figure skating</li>
  <li>Speed skating</li>
</ul>"#,
    );
    let ch03 = chapter(
        "Chapter III",
        r#"<h2>CHAPTER III<br/>TOBOGGANING</h2>
<p>The toboggan run at St. Moritz is known to <a href="https://en.wikipedia.org/wiki/Cresta_Run">every rider</a> of the Cresta.</p>
<table>
  <tr><th>Run</th><th>Length</th></tr>
  <tr><td>Cresta</td><td>1,212 m</td></tr>
</table>"#,
    );
    let ch04 = chapter(
        "Chapter IV",
        r#"<h2>CHAPTER IV<br/>ICE-HOCKEY</h2>
<p>Ice-hockey is a game that requires both skill and a great deal of courage from the players.</p>
<h3>CHAPTER V<br/>SKI-ING</h3>
<p>Ski-ing, the newest of the sports, has taken the valleys by storm this season.</p>"#,
    );
    let ch06 = chapter(
        "Chapter VI",
        r#"<h2>CHAPTER VI<br/>NOTES ON THE WINTER RESORTS</h2>
<p>Every resort has its own character, and the visitor should choose with care.</p>
<h3 id="davos">DAVOS AND ST. MORITZ</h3>
<p>Davos is the larger of the two and lies in a wide valley facing south.</p>"#,
    );

    build_zip(&[
        ("mimetype", "application/epub+zip"),
        ("META-INF/container.xml", CONTAINER_XML),
        ("OEBPS/content.opf", OPF),
        ("OEBPS/toc.ncx", NCX),
        ("OEBPS/style.css", "p { text-indent: 1em; }"),
        ("OEBPS/text/cover.xhtml", &cover),
        ("OEBPS/text/ch01.xhtml", &ch01),
        ("OEBPS/text/ch02.xhtml", &ch02),
        ("OEBPS/text/ch03.xhtml", &ch03),
        ("OEBPS/text/ch04.xhtml", &ch04),
        ("OEBPS/text/ch06.xhtml", &ch06),
    ])
}

/// An EPUB 3 book whose table of contents is a navigation document.
pub fn nav_epub() -> Vec<u8> {
    let opf = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="3.0" unique-identifier="uid">
  <metadata xmlns:dc="http://purl.org/dc/elements/1.1/">
    <dc:title>Alpine Notes</dc:title>
    <dc:identifier id="uid">urn:uuid:0f0e0d0c-0b0a-0908-0706-050403020100</dc:identifier>
    <dc:language>en</dc:language>
  </metadata>
  <manifest>
    <item id="nav" href="nav.xhtml" media-type="application/xhtml+xml" properties="nav"/>
    <item id="one" href="one.xhtml" media-type="application/xhtml+xml"/>
    <item id="two" href="two%20part.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine>
    <itemref idref="one"/>
    <itemref idref="two"/>
  </spine>
</package>"#;
    let nav = r#"<?xml version="1.0" encoding="UTF-8"?>
<html xmlns="http://www.w3.org/1999/xhtml" xmlns:epub="http://www.idpf.org/2007/ops">
<head><title>Contents</title></head>
<body>
  <nav epub:type="toc"><ol>
    <li><a href="one.xhtml">Part One</a></li>
    <li><a href="two%20part.xhtml#start">Part Two</a></li>
  </ol></nav>
</body>
</html>"#;
    let one = chapter(
        "One",
        "<p>The first part describes the journey up the valley to the village.</p>",
    );
    let two = chapter(
        "Two",
        "<p>The second part describes the long descent on skis to the lake.</p>",
    );

    build_zip(&[
        ("mimetype", "application/epub+zip"),
        ("META-INF/container.xml", CONTAINER_XML),
        ("OEBPS/content.opf", opf),
        ("OEBPS/nav.xhtml", nav),
        ("OEBPS/one.xhtml", &one),
        ("OEBPS/two part.xhtml", &two),
    ])
}

/// An EPUB without any table of contents.
pub fn untitled_epub() -> Vec<u8> {
    let opf = r#"<?xml version="1.0" encoding="UTF-8"?>
<package xmlns="http://www.idpf.org/2007/opf" version="2.0">
  <metadata/>
  <manifest>
    <item id="body" href="body.xhtml" media-type="application/xhtml+xml"/>
  </manifest>
  <spine><itemref idref="body"/></spine>
</package>"#;
    let body = chapter(
        "Body",
        "<p>There is no table of contents in this small book at all.</p>",
    );

    build_zip(&[
        ("mimetype", "application/epub+zip"),
        ("META-INF/container.xml", CONTAINER_XML),
        ("OEBPS/content.opf", opf),
        ("OEBPS/body.xhtml", &body),
    ])
}

/// Write `data` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}
