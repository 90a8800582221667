//! GraphML serialisation for [`Graph`] values.
//!
//! The output is a plain undirected GraphML document that NetLogo's network
//! extension and networkx both import. Nodes and edges are written in
//! ascending order so identical graphs produce identical files.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use smallworld_core::Graph;
use thiserror::Error;
use tracing::{info, instrument};

const GRAPHML_NAMESPACE: &str = "http://graphml.graphdrawing.org/xmlns";
const GRAPHML_SCHEMA: &str = "http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";
const NAME_KEY: &str = "d0";

/// Errors raised while exporting GraphML.
#[derive(Debug, Error)]
pub enum GraphmlError {
    /// Creating or writing the output file failed.
    #[error("failed to write GraphML to `{path}`: {source}")]
    Io {
        /// Destination path.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
}

/// Writes graphs as GraphML, optionally tagging the document with a graph
/// name.
///
/// # Examples
/// ```
/// use smallworld_core::Graph;
/// use smallworld_graphml::GraphmlWriter;
///
/// let graph = Graph::try_from_edges(2, [(0, 1)])?;
/// let mut buffer = Vec::new();
/// GraphmlWriter::new().write(&graph, &mut buffer)?;
/// let text = String::from_utf8(buffer)?;
/// assert!(text.contains(r#"<edge source="0" target="1"/>"#));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct GraphmlWriter {
    graph_name: Option<String>,
}

impl GraphmlWriter {
    /// Creates a writer that emits no graph name.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `name` as the graph's `name` attribute.
    #[must_use]
    pub fn with_graph_name(mut self, name: impl Into<String>) -> Self {
        self.graph_name = Some(name.into());
        self
    }

    /// Returns the configured graph name.
    #[must_use]
    pub fn graph_name(&self) -> Option<&str> {
        self.graph_name.as_deref()
    }

    /// Serialises `graph` to `writer`.
    ///
    /// # Errors
    /// Returns any [`io::Error`] raised by `writer`.
    pub fn write(&self, graph: &Graph, mut writer: impl Write) -> io::Result<()> {
        writeln!(writer, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            writer,
            r#"<graphml xmlns="{GRAPHML_NAMESPACE}" xmlns:xsi="{XSI_NAMESPACE}" xsi:schemaLocation="{GRAPHML_NAMESPACE} {GRAPHML_SCHEMA}">"#
        )?;
        if self.graph_name.is_some() {
            writeln!(
                writer,
                r#"  <key id="{NAME_KEY}" for="graph" attr.name="name" attr.type="string"/>"#
            )?;
        }
        writeln!(writer, r#"  <graph edgedefault="undirected">"#)?;
        if let Some(name) = &self.graph_name {
            writeln!(writer, r#"    <data key="{NAME_KEY}">{}</data>"#, escape(name))?;
        }
        for node in graph.nodes() {
            writeln!(writer, r#"    <node id="{node}"/>"#)?;
        }
        for (source, target) in graph.edges() {
            writeln!(writer, r#"    <edge source="{source}" target="{target}"/>"#)?;
        }
        writeln!(writer, "  </graph>")?;
        writeln!(writer, "</graphml>")?;
        Ok(())
    }

    /// Creates (or truncates) `path` and serialises `graph` into it.
    ///
    /// # Errors
    /// Returns [`GraphmlError::Io`] when the file cannot be created, written,
    /// or flushed.
    #[instrument(name = "graphml.write_file", err, skip(self, graph), fields(path = %path.display()))]
    pub fn write_file(&self, graph: &Graph, path: &Path) -> Result<(), GraphmlError> {
        let to_error = |source| GraphmlError::Io {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(to_error)?;
        let mut writer = BufWriter::new(file);
        self.write(graph, &mut writer).map_err(to_error)?;
        writer.flush().map_err(to_error)?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "graphml written"
        );
        Ok(())
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;
    use tempfile::TempDir;

    type TestResult = Result<(), Box<dyn std::error::Error>>;

    fn render(writer: &GraphmlWriter, graph: &Graph) -> Result<String, Box<dyn std::error::Error>> {
        let mut buffer = Vec::new();
        writer.write(graph, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    #[rstest]
    fn writes_nodes_then_edges_in_order() -> TestResult {
        let graph = Graph::try_from_edges(3, [(2, 0), (1, 0)])?;
        let text = render(&GraphmlWriter::new(), &graph)?;
        let expected = concat!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n",
            "<graphml xmlns=\"http://graphml.graphdrawing.org/xmlns\" ",
            "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
            "xsi:schemaLocation=\"http://graphml.graphdrawing.org/xmlns ",
            "http://graphml.graphdrawing.org/xmlns/1.0/graphml.xsd\">\n",
            "  <graph edgedefault=\"undirected\">\n",
            "    <node id=\"0\"/>\n",
            "    <node id=\"1\"/>\n",
            "    <node id=\"2\"/>\n",
            "    <edge source=\"0\" target=\"1\"/>\n",
            "    <edge source=\"0\" target=\"2\"/>\n",
            "  </graph>\n",
            "</graphml>\n",
        );
        assert_eq!(text, expected);
        Ok(())
    }

    #[rstest]
    fn graph_name_is_declared_and_escaped() -> TestResult {
        let writer = GraphmlWriter::new().with_graph_name("a<b> & \"c\"");
        assert_eq!(writer.graph_name(), Some("a<b> & \"c\""));
        let text = render(&writer, &Graph::empty(1))?;
        assert!(text.contains(
            r#"<key id="d0" for="graph" attr.name="name" attr.type="string"/>"#
        ));
        assert!(text.contains(r#"<data key="d0">a&lt;b&gt; &amp; &quot;c&quot;</data>"#));
        Ok(())
    }

    #[rstest]
    #[case("plain", "plain")]
    #[case("it's", "it&apos;s")]
    #[case("<&>", "&lt;&amp;&gt;")]
    fn escape_replaces_markup(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(escape(raw), expected);
    }

    #[rstest]
    fn write_file_round_trips_through_disk() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("ring.graphml");
        let graph = smallworld_core::generate(6, 2, 0.0, 1, Some(0))?;
        let writer = GraphmlWriter::new().with_graph_name("ring");
        writer.write_file(&graph, &path)?;
        let on_disk = std::fs::read_to_string(&path)?;
        assert_eq!(on_disk, render(&writer, &graph)?);
        assert_eq!(on_disk.matches("<edge ").count(), 6);
        Ok(())
    }

    #[rstest]
    fn write_file_reports_the_failing_path() -> TestResult {
        let dir = TempDir::new()?;
        let path = dir.path().join("missing").join("graph.graphml");
        let err = GraphmlWriter::new()
            .write_file(&Graph::empty(1), &path)
            .expect_err("parent directory does not exist");
        let GraphmlError::Io { path: reported, .. } = err;
        assert_eq!(reported, path);
        Ok(())
    }
}
