//! Diagram type and output format registries: the closed sets of grammars and
//! formats the server accepts, plus validated render parameters.

use std::path::Path;

use super::error::DiagramError;

/// Minimum accepted scale factor for SVG output.
pub const MIN_SCALE: f64 = 0.1;

/// A diagram grammar supported by the Kroki API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagramType {
    Mermaid,
    Plantuml,
    Graphviz,
    D2,
    Ditaa,
    Svgbob,
    Erd,
    Vegalite,
    Wavedrom,
    Excalidraw,
}

/// All supported diagram types, in the order they are listed to users.
pub const ALL_DIAGRAM_TYPES: &[DiagramType] = &[
    DiagramType::Mermaid,
    DiagramType::Plantuml,
    DiagramType::Graphviz,
    DiagramType::D2,
    DiagramType::Ditaa,
    DiagramType::Svgbob,
    DiagramType::Erd,
    DiagramType::Vegalite,
    DiagramType::Wavedrom,
    DiagramType::Excalidraw,
];

impl DiagramType {
    /// Parse a wire name into a diagram type. Matching is case-insensitive;
    /// `dot` is accepted as an alias for GraphViz.
    pub fn parse(name: &str) -> Result<Self, DiagramError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "mermaid" => Ok(DiagramType::Mermaid),
            "plantuml" => Ok(DiagramType::Plantuml),
            "graphviz" | "dot" => Ok(DiagramType::Graphviz),
            "d2" => Ok(DiagramType::D2),
            "ditaa" => Ok(DiagramType::Ditaa),
            "svgbob" => Ok(DiagramType::Svgbob),
            "erd" => Ok(DiagramType::Erd),
            "vegalite" => Ok(DiagramType::Vegalite),
            "wavedrom" => Ok(DiagramType::Wavedrom),
            "excalidraw" => Ok(DiagramType::Excalidraw),
            other => Err(DiagramError::InvalidParams(format!(
                "Unsupported diagram type '{other}'. Supported types: {}",
                supported_type_names().join(", ")
            ))),
        }
    }

    /// The Kroki API path segment for this type.
    pub fn kroki_name(&self) -> &'static str {
        match self {
            DiagramType::Mermaid => "mermaid",
            DiagramType::Plantuml => "plantuml",
            DiagramType::Graphviz => "graphviz",
            DiagramType::D2 => "d2",
            DiagramType::Ditaa => "ditaa",
            DiagramType::Svgbob => "svgbob",
            DiagramType::Erd => "erd",
            DiagramType::Vegalite => "vegalite",
            DiagramType::Wavedrom => "wavedrom",
            DiagramType::Excalidraw => "excalidraw",
        }
    }
}

/// List of supported wire names (aliases included) for error messages and
/// tool schemas.
pub fn supported_type_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = ALL_DIAGRAM_TYPES.iter().map(|t| t.kroki_name()).collect();
    names.push("dot");
    names
}

/// An output format accepted by the tools.
///
/// `base64` is a wrapper around svg: requests go out with the `svg` path
/// segment and classification treats the body as svg; the final payload is
/// the base64 encoding of the svg bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    Svg,
    Png,
    Pdf,
    Jpeg,
    Base64,
}

impl OutputFormat {
    /// Parse a wire name into an output format (case-insensitive).
    pub fn parse(name: &str) -> Result<Self, DiagramError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "svg" => Ok(OutputFormat::Svg),
            "png" => Ok(OutputFormat::Png),
            "pdf" => Ok(OutputFormat::Pdf),
            "jpeg" | "jpg" => Ok(OutputFormat::Jpeg),
            "base64" => Ok(OutputFormat::Base64),
            other => Err(DiagramError::InvalidParams(format!(
                "Unsupported output format '{other}'. Supported formats: svg, png, pdf, jpeg, base64"
            ))),
        }
    }

    /// The wire name reported back to callers.
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Svg => "svg",
            OutputFormat::Png => "png",
            OutputFormat::Pdf => "pdf",
            OutputFormat::Jpeg => "jpeg",
            OutputFormat::Base64 => "base64",
        }
    }

    /// The format segment used in the outbound Kroki request path.
    /// base64 wraps svg, so it requests svg from the server.
    pub fn path_segment(&self) -> &'static str {
        match self {
            OutputFormat::Base64 => "svg",
            other => other.as_str(),
        }
    }

    /// Whether response bodies of this format are introspected as svg text
    /// for embedded error markers.
    pub fn inspect_as_svg(&self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Base64)
    }

    /// Derive an output format from a file path's extension, if recognizable.
    pub fn from_extension(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?;
        OutputFormat::parse(ext).ok()
    }
}

/// Validated parameters for one render operation.
///
/// Construction is the validation gate: a `RenderRequest` only exists for
/// parameters that passed the closed-set and range checks, so the pipeline
/// past this point never re-validates.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub diagram_type: DiagramType,
    pub format: OutputFormat,
    pub source: String,
    pub scale: f64,
}

impl RenderRequest {
    /// Validate raw tool arguments into a render request.
    pub fn new(
        type_name: &str,
        source: &str,
        format: OutputFormat,
        scale: Option<f64>,
    ) -> Result<Self, DiagramError> {
        let diagram_type = DiagramType::parse(type_name)?;
        if source.trim().is_empty() {
            return Err(DiagramError::InvalidParams(
                "Diagram content must not be empty".into(),
            ));
        }
        let scale = scale.unwrap_or(1.0);
        if !scale.is_finite() || scale < MIN_SCALE {
            return Err(DiagramError::InvalidParams(format!(
                "Scale must be a number >= {MIN_SCALE}, got {scale}"
            )));
        }
        Ok(RenderRequest {
            diagram_type,
            format,
            source: source.to_string(),
            scale,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!(DiagramType::parse("mermaid").unwrap(), DiagramType::Mermaid);
        assert_eq!(DiagramType::parse("PlantUML").unwrap(), DiagramType::Plantuml);
        assert_eq!(DiagramType::parse("graphviz").unwrap(), DiagramType::Graphviz);
        assert_eq!(DiagramType::parse("dot").unwrap(), DiagramType::Graphviz);
        assert_eq!(DiagramType::parse(" d2 ").unwrap(), DiagramType::D2);
    }

    #[test]
    fn test_parse_unknown_type_lists_supported() {
        let err = DiagramType::parse("visio").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("visio"), "should name the rejected type: {msg}");
        assert!(msg.contains("mermaid"), "should list supported types: {msg}");
    }

    #[test]
    fn test_parse_formats() {
        assert_eq!(OutputFormat::parse("svg").unwrap(), OutputFormat::Svg);
        assert_eq!(OutputFormat::parse("JPG").unwrap(), OutputFormat::Jpeg);
        assert_eq!(OutputFormat::parse("base64").unwrap(), OutputFormat::Base64);
        assert!(OutputFormat::parse("bmp").is_err());
    }

    #[test]
    fn test_base64_requests_svg_path_segment() {
        assert_eq!(OutputFormat::Base64.path_segment(), "svg");
        assert_eq!(OutputFormat::Png.path_segment(), "png");
        assert!(OutputFormat::Base64.inspect_as_svg());
        assert!(!OutputFormat::Pdf.inspect_as_svg());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            OutputFormat::from_extension(Path::new("/tmp/out.svg")),
            Some(OutputFormat::Svg)
        );
        assert_eq!(
            OutputFormat::from_extension(Path::new("diagram.PNG")),
            Some(OutputFormat::Png)
        );
        assert_eq!(OutputFormat::from_extension(Path::new("noext")), None);
        assert_eq!(OutputFormat::from_extension(Path::new("file.txt")), None);
    }

    #[test]
    fn test_request_rejects_empty_content() {
        let err = RenderRequest::new("mermaid", "   ", OutputFormat::Svg, None).unwrap_err();
        assert!(matches!(err, DiagramError::InvalidParams(_)));
    }

    #[test]
    fn test_request_rejects_out_of_range_scale() {
        let err =
            RenderRequest::new("mermaid", "graph TD; A-->B;", OutputFormat::Svg, Some(0.05))
                .unwrap_err();
        assert!(matches!(err, DiagramError::InvalidParams(_)));
        assert!(
            RenderRequest::new("mermaid", "graph TD; A-->B;", OutputFormat::Svg, Some(f64::NAN))
                .is_err()
        );
    }

    #[test]
    fn test_request_default_scale() {
        let req = RenderRequest::new("mermaid", "graph TD; A-->B;", OutputFormat::Svg, None)
            .unwrap();
        assert_eq!(req.scale, 1.0);
    }

    #[test]
    fn test_shrink_scale_accepted() {
        let req =
            RenderRequest::new("mermaid", "graph TD; A-->B;", OutputFormat::Svg, Some(0.5))
                .unwrap();
        assert_eq!(req.scale, 0.5);
    }
}
