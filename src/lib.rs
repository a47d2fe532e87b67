//! PDF Image Extractor Library
//!
//! Extracts raster images embedded as Image XObjects in a PDF and turns them
//! into standalone image files. JPEG (DCTDecode) and JPEG2000 (JPXDecode)
//! streams are passed through untouched; FlateDecode streams are inflated and
//! reinterpreted as pixel data according to the image's colorspace, then
//! re-encoded as PNG.
//!
//! The decode engine (`classify_and_decode`) is a pure function of the
//! `ImageXObject` record it is given; page traversal, record construction and
//! file writing live in the surrounding walker so the engine stays free of
//! document state.

use flate2::read::ZlibDecoder;
use image::{DynamicImage, GrayImage, RgbImage};
use lopdf::{Dictionary, Document, Object, Stream};
use std::io::Read;
use std::path::PathBuf;
use thiserror::Error;

/// Row layout for 1-bit-per-pixel grayscale images.
///
/// PDF generators disagree on whether each row of a 1-bit bitmap is padded to
/// a byte boundary. This is an explicit choice rather than a guess: the
/// expected inflated size is computed from the selected layout and a stream
/// that does not match is rejected with a size mismatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrayRowLayout {
    /// Each row starts on a byte boundary (`ceil(width/8)` bytes per row).
    ByteAligned,
    /// Bits run continuously across row boundaries (`ceil(width*height/8)`
    /// bytes total).
    Packed,
}

/// Options for image extraction
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Row layout assumed for 1-bit DeviceGray images
    pub gray_rows: GrayRowLayout,
    /// Verbose output
    pub verbose: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            gray_rows: GrayRowLayout::ByteAligned,
            verbose: false,
        }
    }
}

/// XObject subtype as stored in the stream dictionary
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Subtype {
    Image,
    Form,
    Other(String),
}

/// Filter metadata of an image stream, validated at record construction.
///
/// `/Filter` may be absent, a single name, or an array of names. Any other
/// shape is rejected while building the `ImageXObject` and never shows up
/// here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    None,
    Single(String),
    Multiple(Vec<String>),
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::None => write!(f, "no filter"),
            Filter::Single(name) => write!(f, "/{}", name),
            Filter::Multiple(names) => {
                write!(f, "[")?;
                for (i, name) in names.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "/{}", name)?;
                }
                write!(f, "]")
            }
        }
    }
}

/// Colorspace of an image stream
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRgb,
    DeviceGray,
    Other(String),
}

impl ColorSpace {
    fn name(&self) -> &str {
        match self {
            ColorSpace::DeviceRgb => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
            ColorSpace::Other(name) => name,
        }
    }
}

impl std::fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "/{}", self.name())
    }
}

/// A resolved Image XObject record: dictionary metadata plus the raw
/// (still filtered) stream bytes, exactly as stored in the document.
#[derive(Debug, Clone)]
pub struct ImageXObject {
    pub subtype: Subtype,
    pub filter: Filter,
    pub color_space: ColorSpace,
    pub bits_per_component: u32,
    pub width: u32,
    pub height: u32,
    pub raw_stream: Vec<u8>,
}

/// Container format of a passed-through image stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodedFormat {
    Jpeg,
    Jpeg2000,
}

/// Pixel layout of an inflated image stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorModel {
    /// Tightly packed 8-bit RGB triples, row-major
    Rgb8,
    /// 1-bit grayscale samples (row layout per `GrayRowLayout`)
    Gray1,
}

/// Decoded image output: either a complete image container to write as-is,
/// or a decompressed pixel buffer still needing an encoding step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodedImage {
    Encoded {
        format: EncodedFormat,
        bytes: Vec<u8>,
    },
    RawPixels {
        color_model: ColorModel,
        width: u32,
        height: u32,
        bytes: Vec<u8>,
    },
}

/// How a classified image stream will be decoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodePlan {
    /// Stream bytes already form a complete image container
    PassThrough(EncodedFormat),
    /// Inflate the stream and reinterpret it as a pixel buffer
    InflatePixels(ColorModel),
}

/// Decode result with the advisory signature sniff recorded alongside
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub image: DecodedImage,
    pub sniffed: SniffedKind,
}

/// Image signature detected in the leading bytes of a stream.
///
/// Diagnostic only: the decode path is always chosen from the filter
/// metadata, never from the sniffed signature. A mismatch (say, a
/// FlateDecode stream that is actually a finished PNG) is worth logging but
/// not acting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SniffedKind {
    Jpeg,
    Jpeg2000,
    Png,
    Gif87a,
    Gif89a,
    Unknown,
}

impl std::fmt::Display for SniffedKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SniffedKind::Jpeg => write!(f, "JPEG signature detected"),
            SniffedKind::Jpeg2000 => write!(f, "JPEG2000 signature detected"),
            SniffedKind::Png => write!(f, "PNG signature detected"),
            SniffedKind::Gif87a => write!(f, "GIF87a signature detected"),
            SniffedKind::Gif89a => write!(f, "GIF89a signature detected"),
            SniffedKind::Unknown => write!(f, "no known image signature"),
        }
    }
}

/// Per-image decode error.
///
/// Every variant except `InvalidRecord` is recoverable: the caller logs the
/// reason, skips the image and keeps going, so one malformed object never
/// halts a batch over a whole document.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed filter metadata")]
    MalformedMetadata,
    #[error("no filter metadata present")]
    MissingFilter,
    #[error("multi-filter chain not handled")]
    MultiFilterChain,
    #[error("unknown filter /{0}")]
    UnknownFilter(String),
    #[error("unrecognized colorspace /{0}")]
    UnrecognizedColorSpace(String),
    #[error("unsupported bit depth {bits} for /{color_space}")]
    UnsupportedBitDepth { color_space: String, bits: u32 },
    #[error("inflate failed: {0}")]
    Inflate(String),
    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
    #[error("invalid image record: {0}")]
    InvalidRecord(String),
}

impl DecodeError {
    /// Whether the walker may skip this image and continue the batch.
    /// `InvalidRecord` signals an upstream contract violation and is
    /// escalated instead.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, DecodeError::InvalidRecord(_))
    }
}

/// Error type for document-level extraction operations
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to load PDF: {0}")]
    Load(String),
    #[error("invalid image XObject on page {page}: {source}")]
    Input { page: usize, source: DecodeError },
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Classify the leading bytes of a stream against known image signatures.
///
/// Advisory only; see [`SniffedKind`].
pub fn sniff_magic(bytes: &[u8]) -> SniffedKind {
    const JPEG_MAGIC: [u8; 2] = [0xFF, 0xD8];
    const PNG_MAGIC: [u8; 4] = [0x89, 0x50, 0x4E, 0x47];
    const JP2_SIGNATURE: [u8; 12] = [
        0x00, 0x00, 0x00, 0x0C, 0x6A, 0x50, 0x20, 0x20, 0x0D, 0x0A, 0x87, 0x0A,
    ];

    if bytes.starts_with(&JPEG_MAGIC) {
        SniffedKind::Jpeg
    } else if bytes.starts_with(&JP2_SIGNATURE) {
        SniffedKind::Jpeg2000
    } else if bytes.starts_with(&PNG_MAGIC) {
        SniffedKind::Png
    } else if bytes.starts_with(b"GIF87a") {
        SniffedKind::Gif87a
    } else if bytes.starts_with(b"GIF89a") {
        SniffedKind::Gif89a
    } else {
        SniffedKind::Unknown
    }
}

/// Reduce the filter metadata to a single canonical filter name
fn resolve_filter(filter: &Filter) -> Result<&str, DecodeError> {
    match filter {
        Filter::None => Err(DecodeError::MissingFilter),
        Filter::Single(name) => Ok(name),
        Filter::Multiple(names) => match names.as_slice() {
            [] => Err(DecodeError::MalformedMetadata),
            [single] => Ok(single),
            // Refuse rather than guess an application order
            _ => Err(DecodeError::MultiFilterChain),
        },
    }
}

/// Classify an image record into a decode plan.
///
/// This is the dispatch table: DCTDecode and JPXDecode pass through with any
/// colorspace, FlateDecode is inflated for 8-bit DeviceRGB or 1-bit
/// DeviceGray, everything else is a recoverable error.
pub fn classify(xobj: &ImageXObject) -> Result<DecodePlan, DecodeError> {
    if xobj.subtype != Subtype::Image {
        return Err(DecodeError::InvalidRecord(format!(
            "subtype {:?} reached the decoder; the caller must filter non-image XObjects",
            xobj.subtype
        )));
    }

    match resolve_filter(&xobj.filter)? {
        "DCTDecode" => Ok(DecodePlan::PassThrough(EncodedFormat::Jpeg)),
        "JPXDecode" => Ok(DecodePlan::PassThrough(EncodedFormat::Jpeg2000)),
        "FlateDecode" => match &xobj.color_space {
            ColorSpace::DeviceRgb => {
                if xobj.bits_per_component != 8 {
                    return Err(DecodeError::UnsupportedBitDepth {
                        color_space: xobj.color_space.name().to_string(),
                        bits: xobj.bits_per_component,
                    });
                }
                Ok(DecodePlan::InflatePixels(ColorModel::Rgb8))
            }
            ColorSpace::DeviceGray => {
                if xobj.bits_per_component != 1 {
                    return Err(DecodeError::UnsupportedBitDepth {
                        color_space: xobj.color_space.name().to_string(),
                        bits: xobj.bits_per_component,
                    });
                }
                Ok(DecodePlan::InflatePixels(ColorModel::Gray1))
            }
            ColorSpace::Other(name) => Err(DecodeError::UnrecognizedColorSpace(name.clone())),
        },
        other => Err(DecodeError::UnknownFilter(other.to_string())),
    }
}

/// Inflate a FlateDecode (zlib) stream
fn inflate(data: &[u8]) -> Result<Vec<u8>, DecodeError> {
    let mut decoder = ZlibDecoder::new(data);
    let mut decoded = Vec::new();
    decoder
        .read_to_end(&mut decoded)
        .map_err(|e| DecodeError::Inflate(e.to_string()))?;
    Ok(decoded)
}

/// Exact byte length an inflated pixel buffer must have
fn expected_pixel_len(
    model: ColorModel,
    width: u32,
    height: u32,
    gray_rows: GrayRowLayout,
) -> usize {
    let (w, h) = (width as usize, height as usize);
    match model {
        ColorModel::Rgb8 => w * h * 3,
        ColorModel::Gray1 => match gray_rows {
            GrayRowLayout::ByteAligned => w.div_ceil(8) * h,
            GrayRowLayout::Packed => (w * h).div_ceil(8),
        },
    }
}

/// Classify and decode one image record. The sole decode entry point.
///
/// Pure function of its arguments: no state is kept between calls, so the
/// same record always decodes to bit-identical output and calls may be
/// fanned out across threads freely.
pub fn classify_and_decode(
    xobj: &ImageXObject,
    options: &ExtractOptions,
) -> Result<Decoded, DecodeError> {
    let sniffed = sniff_magic(&xobj.raw_stream);
    let plan = classify(xobj)?;

    let image = match plan {
        DecodePlan::PassThrough(format) => DecodedImage::Encoded {
            format,
            bytes: xobj.raw_stream.clone(),
        },
        DecodePlan::InflatePixels(model) => {
            let inflated = inflate(&xobj.raw_stream)?;
            let expected = expected_pixel_len(model, xobj.width, xobj.height, options.gray_rows);
            if inflated.len() != expected {
                return Err(DecodeError::SizeMismatch {
                    expected,
                    actual: inflated.len(),
                });
            }
            DecodedImage::RawPixels {
                color_model: model,
                width: xobj.width,
                height: xobj.height,
                bytes: inflated,
            }
        }
    };

    Ok(Decoded { image, sniffed })
}

/// Resolve a reference to get the actual object
fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        _ => Some(obj),
    }
}

/// Get colorspace name from a PDF object (name, array head, or reference)
fn color_space_name(obj: &Object, doc: &Document) -> String {
    match obj {
        Object::Name(name) => String::from_utf8_lossy(name).to_string(),
        Object::Array(arr) => {
            if let Some(Object::Name(name)) = arr.first() {
                String::from_utf8_lossy(name).to_string()
            } else {
                "Unknown".to_string()
            }
        }
        Object::Reference(id) => {
            if let Ok(resolved) = doc.get_object(*id) {
                color_space_name(resolved, doc)
            } else {
                "Unknown".to_string()
            }
        }
        _ => "Unknown".to_string(),
    }
}

impl ImageXObject {
    /// Build an image record from a stream object, resolving references and
    /// validating field shapes once at this boundary.
    ///
    /// Missing or non-positive dimensions make the record structurally
    /// unusable and return the fatal `InvalidRecord`; a filter entry with an
    /// unexpected shape is the recoverable `MalformedMetadata`.
    pub fn from_stream(doc: &Document, stream: &Stream) -> Result<ImageXObject, DecodeError> {
        let subtype = subtype_of(&stream.dict);

        let width = dict_u32(doc, &stream.dict, b"Width")
            .ok_or_else(|| DecodeError::InvalidRecord("missing or invalid /Width".to_string()))?;
        let height = dict_u32(doc, &stream.dict, b"Height")
            .ok_or_else(|| DecodeError::InvalidRecord("missing or invalid /Height".to_string()))?;

        let bits_per_component = dict_u32(doc, &stream.dict, b"BitsPerComponent").unwrap_or(8);

        let filter = match stream.dict.get(b"Filter") {
            Err(_) => Filter::None,
            Ok(obj) => match resolve(doc, obj) {
                Some(Object::Name(n)) => Filter::Single(String::from_utf8_lossy(n).to_string()),
                Some(Object::Array(arr)) => {
                    let mut names = Vec::with_capacity(arr.len());
                    for item in arr {
                        match resolve(doc, item) {
                            Some(Object::Name(n)) => {
                                names.push(String::from_utf8_lossy(n).to_string())
                            }
                            _ => return Err(DecodeError::MalformedMetadata),
                        }
                    }
                    Filter::Multiple(names)
                }
                _ => return Err(DecodeError::MalformedMetadata),
            },
        };

        let color_space = match stream.dict.get(b"ColorSpace") {
            Ok(obj) => match color_space_name(obj, doc).as_str() {
                "DeviceRGB" => ColorSpace::DeviceRgb,
                "DeviceGray" => ColorSpace::DeviceGray,
                other => ColorSpace::Other(other.to_string()),
            },
            Err(_) => ColorSpace::Other("Unknown".to_string()),
        };

        Ok(ImageXObject {
            subtype,
            filter,
            color_space,
            bits_per_component,
            width,
            height,
            raw_stream: stream.content.clone(),
        })
    }
}

/// Read the XObject subtype from a stream dictionary
fn subtype_of(dict: &Dictionary) -> Subtype {
    match dict.get(b"Subtype") {
        Ok(Object::Name(n)) => match n.as_slice() {
            b"Image" => Subtype::Image,
            b"Form" => Subtype::Form,
            other => Subtype::Other(String::from_utf8_lossy(other).to_string()),
        },
        _ => Subtype::Other("Unknown".to_string()),
    }
}

/// Read a positive integer entry from a dictionary, resolving references
fn dict_u32(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<u32> {
    let obj = dict.get(key).ok()?;
    match resolve(doc, obj)? {
        Object::Integer(n) if *n > 0 => Some(*n as u32),
        _ => None,
    }
}

/// Container format of an extracted image file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Jpeg,
    Jpeg2000,
    Png,
}

impl OutputFormat {
    /// True file extension for this container. The historical script saved
    /// JPEG passthrough data under a `.png` name; that defect is fixed here.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Jpeg2000 => "jp2",
            OutputFormat::Png => "png",
        }
    }
}

/// One extracted, ready-to-write image file
#[derive(Debug, Clone)]
pub struct ExtractedImage {
    /// Zero-based page index
    pub page_index: usize,
    /// Zero-based image index within the page, in resource-dictionary order
    pub image_index: usize,
    /// `Image_page<PP>_img<II>.<ext>`
    pub file_name: String,
    pub format: OutputFormat,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Complete file contents
    pub data: Vec<u8>,
}

/// Result of a document extraction run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractSummary {
    pub pages: usize,
    pub images_found: usize,
    pub images_extracted: usize,
    pub images_skipped: usize,
}

/// Output file name for an image at a given (page, image) position
fn image_file_name(page_index: usize, image_index: usize, format: OutputFormat) -> String {
    format!(
        "Image_page{:02}_img{:02}.{}",
        page_index,
        image_index,
        format.extension()
    )
}

/// Expand a 1-bit grayscale bitmap to 8-bit luma samples (0x00 / 0xFF).
/// `bytes` must already have the exact length for the given layout.
fn expand_gray1(bytes: &[u8], width: u32, height: u32, layout: GrayRowLayout) -> Vec<u8> {
    let (w, h) = (width as usize, height as usize);
    let mut out = Vec::with_capacity(w * h);

    match layout {
        GrayRowLayout::ByteAligned => {
            let stride = w.div_ceil(8);
            for y in 0..h {
                let row = &bytes[y * stride..(y + 1) * stride];
                for x in 0..w {
                    let bit = (row[x / 8] >> (7 - (x % 8))) & 1;
                    out.push(if bit == 1 { 0xFF } else { 0x00 });
                }
            }
        }
        GrayRowLayout::Packed => {
            for i in 0..w * h {
                let bit = (bytes[i / 8] >> (7 - (i % 8))) & 1;
                out.push(if bit == 1 { 0xFF } else { 0x00 });
            }
        }
    }

    out
}

/// Render a decoded image into writable file bytes.
///
/// Passthrough containers are emitted as-is; raw pixel buffers are encoded
/// as PNG.
fn render_output(
    decoded: &DecodedImage,
    gray_rows: GrayRowLayout,
) -> Result<(Vec<u8>, OutputFormat), String> {
    match decoded {
        DecodedImage::Encoded {
            format: EncodedFormat::Jpeg,
            bytes,
        } => Ok((bytes.clone(), OutputFormat::Jpeg)),
        DecodedImage::Encoded {
            format: EncodedFormat::Jpeg2000,
            bytes,
        } => Ok((bytes.clone(), OutputFormat::Jpeg2000)),
        DecodedImage::RawPixels {
            color_model,
            width,
            height,
            bytes,
        } => {
            let img = match color_model {
                ColorModel::Rgb8 => {
                    let rgb = RgbImage::from_raw(*width, *height, bytes.clone())
                        .ok_or("failed to build RGB image from raw data")?;
                    DynamicImage::ImageRgb8(rgb)
                }
                ColorModel::Gray1 => {
                    let luma = expand_gray1(bytes, *width, *height, gray_rows);
                    let gray = GrayImage::from_raw(*width, *height, luma)
                        .ok_or("failed to build grayscale image from raw data")?;
                    DynamicImage::ImageLuma8(gray)
                }
            };

            let mut png_bytes = Vec::new();
            img.write_to(
                &mut std::io::Cursor::new(&mut png_bytes),
                image::ImageFormat::Png,
            )
            .map_err(|e| format!("failed to encode PNG: {}", e))?;

            Ok((png_bytes, OutputFormat::Png))
        }
    }
}

/// Get resources for a page, checking the parent node if needed
fn page_resources(doc: &Document, page_dict: &Dictionary) -> Object {
    if let Ok(resources) = page_dict.get(b"Resources") {
        return resources.clone();
    }

    if let Ok(Object::Reference(parent_id)) = page_dict.get(b"Parent") {
        if let Ok(Object::Dictionary(parent_dict)) = doc.get_object(*parent_id) {
            if let Ok(resources) = parent_dict.get(b"Resources") {
                return resources.clone();
            }
        }
    }

    Object::Null
}

/// Collect the XObject streams of a resource dictionary, preserving the
/// dictionary's insertion order (image indices depend on it).
fn xobjects_in_order(doc: &Document, resources: &Object) -> Vec<(String, Stream)> {
    let mut result = Vec::new();

    let res_dict = match resolve(doc, resources) {
        Some(Object::Dictionary(d)) => d,
        _ => return result,
    };

    let xobjects = match res_dict.get(b"XObject") {
        Ok(x) => x,
        Err(_) => return result,
    };

    let xobj_dict = match resolve(doc, xobjects) {
        Some(Object::Dictionary(d)) => d,
        _ => return result,
    };

    for (name, value) in xobj_dict.iter() {
        if let Some(Object::Stream(stream)) = resolve(doc, value) {
            result.push((String::from_utf8_lossy(name).to_string(), stream.clone()));
        }
    }

    result
}

/// Walk every page of a document, decode each Image XObject and return the
/// ready-to-write files together with a run summary.
///
/// Recoverable decode errors are logged and counted as skips; a structurally
/// broken record aborts the run with `ExtractError::Input`.
pub fn extract_images(
    doc: &Document,
    options: &ExtractOptions,
    log: impl Fn(&str),
) -> Result<(Vec<ExtractedImage>, ExtractSummary), ExtractError> {
    let pages = doc.get_pages();
    let mut images: Vec<ExtractedImage> = Vec::new();
    let mut summary = ExtractSummary::default();

    for (page_index, (_page_num, &page_id)) in pages.iter().enumerate() {
        summary.pages += 1;

        let page_dict = match doc.get_object(page_id) {
            Ok(Object::Dictionary(d)) => d.clone(),
            _ => continue,
        };

        let resources = page_resources(doc, &page_dict);
        let xobjects = xobjects_in_order(doc, &resources);
        log(&format!(
            "Page {:02}: {} XObject(s)",
            page_index,
            xobjects.len()
        ));

        let mut image_index = 0usize;

        for (name, stream) in xobjects {
            match subtype_of(&stream.dict) {
                Subtype::Form => {
                    // Forms may hold nested image resources; not traversed here
                    log(&format!("  /{}: skipping Form XObject", name));
                    log(&format!("  {:?}", stream.dict));
                    continue;
                }
                Subtype::Other(other) => {
                    log(&format!(
                        "  /{}: skipping XObject with subtype /{}",
                        name, other
                    ));
                    continue;
                }
                Subtype::Image => {}
            }

            summary.images_found += 1;

            let xobj = match ImageXObject::from_stream(doc, &stream) {
                Ok(xobj) => xobj,
                Err(e) if e.is_recoverable() => {
                    log(&format!("  /{}: skipping: {}", name, e));
                    summary.images_skipped += 1;
                    image_index += 1;
                    continue;
                }
                Err(e) => {
                    return Err(ExtractError::Input {
                        page: page_index,
                        source: e,
                    })
                }
            };

            log(&format!(
                "  /{}: image {:02}: {} {} {}bpc {}x{}",
                name,
                image_index,
                xobj.filter,
                xobj.color_space,
                xobj.bits_per_component,
                xobj.width,
                xobj.height
            ));
            log(&format!("    {}", sniff_magic(&xobj.raw_stream)));

            match classify_and_decode(&xobj, options) {
                Ok(decoded) => match render_output(&decoded.image, options.gray_rows) {
                    Ok((data, format)) => {
                        let file_name = image_file_name(page_index, image_index, format);
                        log(&format!("    -> {} ({} bytes)", file_name, data.len()));
                        images.push(ExtractedImage {
                            page_index,
                            image_index,
                            file_name,
                            format,
                            width: xobj.width,
                            height: xobj.height,
                            data,
                        });
                        summary.images_extracted += 1;
                    }
                    Err(e) => {
                        log(&format!("    skipping: {}", e));
                        summary.images_skipped += 1;
                    }
                },
                Err(e) if e.is_recoverable() => {
                    log(&format!("    skipping: {}", e));
                    summary.images_skipped += 1;
                }
                Err(e) => {
                    return Err(ExtractError::Input {
                        page: page_index,
                        source: e,
                    })
                }
            }

            image_index += 1;
        }
    }

    log(&format!(
        "Extracted {} of {} images ({} skipped)",
        summary.images_extracted, summary.images_found, summary.images_skipped
    ));

    Ok((images, summary))
}

/// Extract images from an in-memory PDF
pub fn extract_pdf_bytes(
    input_bytes: &[u8],
    options: &ExtractOptions,
) -> Result<(Vec<ExtractedImage>, ExtractSummary), ExtractError> {
    let doc = Document::load_mem(input_bytes).map_err(|e| ExtractError::Load(e.to_string()))?;

    let log = |msg: &str| {
        if options.verbose {
            println!("{}", msg);
        }
    };

    extract_images(&doc, options, log)
}

pub mod file_ops {
    use super::*;
    use std::fs;
    use std::path::Path;

    /// Extract images from a PDF file into an output directory
    pub fn extract_pdf_file(
        input_path: &Path,
        output_dir: &Path,
        options: &ExtractOptions,
    ) -> Result<ExtractSummary, ExtractError> {
        let doc = Document::load(input_path)
            .map_err(|e| ExtractError::Load(format!("{:?}: {}", input_path, e)))?;

        fs::create_dir_all(output_dir).map_err(|e| ExtractError::Write {
            path: output_dir.to_path_buf(),
            source: e,
        })?;

        let log = |msg: &str| {
            if options.verbose {
                println!("{}", msg);
            }
        };

        let (images, summary) = extract_images(&doc, options, log)?;

        for image in &images {
            let path = output_dir.join(&image.file_name);
            fs::write(&path, &image.data).map_err(|e| ExtractError::Write { path, source: e })?;
        }

        Ok(summary)
    }
}
