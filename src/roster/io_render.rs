use serde::Serialize;
use tera::{Context, Tera};

use crate::roster::*;

/// The two reports of a view.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RenderedArtifactPair {
    pub base_name: String,
    pub csv: Vec<u8>,
    pub html: Vec<u8>,
}

impl RenderedArtifactPair {
    pub fn csv_file_name(&self) -> String {
        format!("{}.csv", self.base_name)
    }

    pub fn html_file_name(&self) -> String {
        format!("{}.html", self.base_name)
    }
}

/// Renders a view as CSV and as an HTML table.
///
/// Both reports have the same rows in the same order (sorted by last name) and the same
/// columns. The first column holds the position of the member in the source and has no
/// header.
pub fn render_view(view: &RosterView) -> RosterResult<RenderedArtifactPair> {
    let members = view.sorted_members();
    debug!(
        "render_view: {} ({:?}): {} rows, {} columns",
        view.label(),
        view.base_name,
        members.len(),
        view.headers.len()
    );
    let csv = render_csv(view, &members)?;
    let html = render_html(view, &members)?;
    Ok(RenderedArtifactPair {
        base_name: view.base_name.clone(),
        csv,
        html: html.into_bytes(),
    })
}

fn render_csv(view: &RosterView, members: &[&MemberRecord]) -> RosterResult<Vec<u8>> {
    let file_name = format!("{}.csv", view.base_name);
    let mut wtr = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(vec![]);

    let header: Vec<&str> = std::iter::once("")
        .chain(view.headers.iter().map(|s| s.as_str()))
        .collect();
    wtr.write_record(&header).context(RenderingCsvSnafu {
        file_name: file_name.as_str(),
    })?;

    for m in members.iter() {
        let idx = m.source_index.to_string();
        let mut line: Vec<&str> = vec![idx.as_str()];
        line.extend(m.window_values(view.passthrough));
        wtr.write_record(&line).context(RenderingCsvSnafu {
            file_name: file_name.as_str(),
        })?;
    }

    wtr.into_inner()
        .map_err(|e| csv::Error::from(io::Error::new(e.error().kind(), e.error().to_string())))
        .context(RenderingCsvSnafu { file_name })
}

const TABLE_TEMPLATE: &str = r#"<table border="1" class="dataframe">
  <thead>
    <tr style="text-align: right;">
      <th></th>
{%- for h in headers %}
      <th>{{ h }}</th>
{%- endfor %}
    </tr>
  </thead>
  <tbody>
{%- for row in rows %}
    <tr>
      <th>{{ row.index }}</th>
{%- for v in row.cells %}
      <td>{{ v }}</td>
{%- endfor %}
    </tr>
{%- endfor %}
  </tbody>
</table>
"#;

#[derive(Serialize)]
struct HtmlRow<'a> {
    index: usize,
    cells: Vec<&'a str>,
}

// The template name ends in .html, so every cell is escaped.
fn render_html(view: &RosterView, members: &[&MemberRecord]) -> RosterResult<String> {
    let file_name = format!("{}.html", view.base_name);
    let mut engine = Tera::default();
    engine
        .add_raw_template("table.html", TABLE_TEMPLATE)
        .context(RenderingHtmlSnafu {
            file_name: file_name.as_str(),
        })?;

    let rows: Vec<HtmlRow> = members
        .iter()
        .map(|m| HtmlRow {
            index: m.source_index,
            cells: m.window_values(view.passthrough),
        })
        .collect();
    let mut context = Context::new();
    context.insert("headers", &view.headers);
    context.insert("rows", &rows);

    engine
        .render("table.html", &context)
        .context(RenderingHtmlSnafu { file_name })
}
