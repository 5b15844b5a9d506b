//! Table fragment rendering.
//!
//! # Responsibilities
//! - Apply sort, clamp the page and slice the visible rows
//! - Emit header buttons that re-sort through the partial endpoint
//! - Emit the pager carrying page size, sort and direction forward
//! - Wrap everything in `#table-<id>` so the response replaces itself
//!
//! # Design Decisions
//! - Header links flip the request's current direction, whichever column
//!   was clicked, and reset to page 1
//! - Unknown sort columns are ignored
//! - All text (ids, column names, cells, URLs) goes through `escape`

use crate::data::{DataFrame, Direction};
use crate::html::escape;
use crate::table::pager::PageWindow;

/// Path prefix of the partial-render endpoint.
pub const TABLE_ENDPOINT: &str = "/_bento/table";

/// Output of one render, with the numbers needed for logging and metrics.
#[derive(Debug, Clone)]
pub struct RenderedTable {
    pub html: String,
    pub window: PageWindow,
}

/// DOM id of a table's container.
pub fn container_id(table_id: &str) -> String {
    format!("table-{table_id}")
}

/// URL of the partial endpoint for the given state.
pub fn table_url(
    table_id: &str,
    page: usize,
    page_size: usize,
    sort: Option<&str>,
    direction: Direction,
) -> String {
    let mut url = format!(
        "{TABLE_ENDPOINT}/{}?page={page}&page_size={page_size}",
        urlencoding::encode(table_id)
    );
    if let Some(sort) = sort {
        url.push_str("&sort=");
        url.push_str(&urlencoding::encode(sort));
    }
    url.push_str("&direction=");
    url.push_str(direction.as_str());
    url
}

/// Render `frame` as a self-replacing table fragment.
pub fn render_table(
    frame: DataFrame,
    table_id: &str,
    page: i64,
    page_size: usize,
    sort: Option<&str>,
    direction: Direction,
) -> RenderedTable {
    let frame = match sort {
        Some(column) => frame.sort(column, direction),
        None => frame,
    };
    let window = PageWindow::compute(frame.height(), page, page_size);
    let frame = frame.slice(window.offset, window.len);

    let target = format!("#{}", escape(&container_id(table_id)));
    let next_direction = direction.toggled();

    let header_cells: String = frame
        .columns()
        .iter()
        .map(|column| {
            let url = table_url(table_id, 1, page_size, Some(column), next_direction);
            let aria = if sort == Some(column.as_str()) {
                match direction {
                    Direction::Asc => " aria-sort='ascending'",
                    Direction::Desc => " aria-sort='descending'",
                }
            } else {
                ""
            };
            format!(
                "<th{aria}><button hx-get='{}' hx-target='{target}' hx-swap='outerHTML'>{}</button></th>",
                escape(&url),
                escape(column)
            )
        })
        .collect();

    let body_rows: String = frame
        .rows()
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|value| format!("<td>{}</td>", escape(&value.to_string())))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    let pager_button = |label: &str, page: usize, disabled: bool| {
        let url = table_url(table_id, page, page_size, sort, direction);
        format!(
            "<button hx-get='{}' hx-target='{target}' hx-swap='outerHTML'{}>{label}</button>",
            escape(&url),
            if disabled { " disabled" } else { "" }
        )
    };
    let pager = format!(
        "<div class='table__pager'>{}<span>Page {} / {}</span>{}</div>",
        pager_button("Prev", window.prev_page(), window.is_first()),
        window.page,
        window.total_pages,
        pager_button("Next", window.next_page(), window.is_last()),
    );

    let html = format!(
        "<div class='card table-card' id='{}'><div class='table__viewport'>\
         <table class='table'><thead><tr>{header_cells}</tr></thead>\
         <tbody>{body_rows}</tbody></table></div>{pager}</div>",
        escape(&container_id(table_id))
    );

    RenderedTable { html, window }
}

/// Render `frame` and return only the HTML.
pub fn render_table_html(
    frame: DataFrame,
    table_id: &str,
    page: i64,
    page_size: usize,
    sort: Option<&str>,
    direction: Direction,
) -> String {
    render_table(frame, table_id, page, page_size, sort, direction).html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::TableData;
    use crate::record;

    fn sample() -> DataFrame {
        TableData::from(vec![
            record! { "a" => 1, "b" => "x" },
            record! { "a" => 2, "b" => "y" },
            record! { "a" => 3, "b" => "z" },
        ])
        .into_frame(None)
        .unwrap()
    }

    fn body_cells(html: &str) -> Vec<Vec<String>> {
        let start = html.find("<tbody>").unwrap() + "<tbody>".len();
        let end = html.find("</tbody>").unwrap();
        html[start..end]
            .split("</tr>")
            .filter(|row| !row.is_empty())
            .map(|row| {
                row.trim_start_matches("<tr>")
                    .split("</td>")
                    .filter(|cell| !cell.is_empty())
                    .map(|cell| cell.trim_start_matches("<td>").to_string())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_first_and_second_page() {
        let page1 = render_table_html(sample(), "t", 1, 2, None, Direction::Asc);
        assert_eq!(body_cells(&page1), vec![vec!["1", "x"], vec!["2", "y"]]);
        assert!(page1.contains("<span>Page 1 / 2</span>"));

        let page2 = render_table_html(sample(), "t", 2, 2, None, Direction::Asc);
        assert_eq!(body_cells(&page2), vec![vec!["3", "z"]]);
        assert!(page2.contains("<span>Page 2 / 2</span>"));
    }

    #[test]
    fn test_out_of_range_pages_clamp() {
        let last = render_table_html(sample(), "t", 2, 2, None, Direction::Asc);
        let beyond = render_table_html(sample(), "t", 99, 2, None, Direction::Asc);
        assert_eq!(last, beyond);

        let first = render_table_html(sample(), "t", 1, 2, None, Direction::Asc);
        assert_eq!(first, render_table_html(sample(), "t", 0, 2, None, Direction::Asc));
        assert_eq!(first, render_table_html(sample(), "t", -3, 2, None, Direction::Asc));
    }

    #[test]
    fn test_sort_descending() {
        let html = render_table_html(sample(), "t", 1, 2, Some("a"), Direction::Desc);
        assert_eq!(body_cells(&html), vec![vec!["3", "z"], vec!["2", "y"]]);
        assert!(html.contains("<th aria-sort='descending'>"));
    }

    #[test]
    fn test_unknown_sort_is_noop_on_rows() {
        let plain = render_table_html(sample(), "t", 1, 2, None, Direction::Asc);
        let stale = render_table_html(sample(), "t", 1, 2, Some("gone"), Direction::Asc);
        assert_eq!(body_cells(&plain), body_cells(&stale));
    }

    #[test]
    fn test_header_links_toggle_current_direction() {
        let html = render_table_html(sample(), "t", 2, 2, Some("a"), Direction::Desc);
        let expected = escape(&table_url("t", 1, 2, Some("b"), Direction::Asc)).into_owned();
        assert!(html.contains(&expected));
        assert!(html.contains("sort=a&amp;direction=asc"));
    }

    #[test]
    fn test_pager_disables_edges() {
        let html = render_table_html(sample(), "t", 1, 2, None, Direction::Asc);
        assert!(html.contains("hx-swap='outerHTML' disabled>Prev</button>"));
        assert!(html.contains("hx-swap='outerHTML'>Next</button>"));

        let html = render_table_html(sample(), "t", 2, 2, None, Direction::Asc);
        assert!(html.contains("hx-swap='outerHTML'>Prev</button>"));
        assert!(html.contains("hx-swap='outerHTML' disabled>Next</button>"));
    }

    #[test]
    fn test_container_is_self_targeting() {
        let html = render_table_html(sample(), "demo-table", 1, 2, None, Direction::Asc);
        assert!(html.starts_with("<div class='card table-card' id='table-demo-table'>"));
        assert!(html.contains("hx-target='#table-demo-table'"));
    }

    #[test]
    fn test_cells_and_ids_are_escaped() {
        let frame = TableData::from(vec![record! { "<col>" => "<script>alert(1)</script>" }])
            .into_frame(None)
            .unwrap();
        let html = render_table_html(frame, "x'><b>", 1, 10, None, Direction::Asc);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("&lt;col&gt;"));
        assert!(!html.contains("x'><b>"));
    }

    #[test]
    fn test_empty_table() {
        let frame = DataFrame::empty(vec!["a".into()]).unwrap();
        let html = render_table_html(frame, "t", 3, 20, None, Direction::Asc);
        assert!(html.contains("<tbody></tbody>"));
        assert!(html.contains("<span>Page 1 / 1</span>"));
        assert!(html.contains("disabled>Prev"));
        assert!(html.contains("disabled>Next"));
    }

    #[test]
    fn test_zero_page_size_renders_all_rows() {
        let html = render_table_html(sample(), "t", 4, 0, None, Direction::Asc);
        assert_eq!(body_cells(&html).len(), 3);
        assert!(html.contains("page_size=0"));
    }

    #[test]
    fn test_table_url_encodes_parameters() {
        let url = table_url("a b", 2, 5, Some("x&y"), Direction::Desc);
        assert_eq!(url, "/_bento/table/a%20b?page=2&page_size=5&sort=x%26y&direction=desc");
        assert_eq!(
            table_url("t", 1, 20, None, Direction::Asc),
            "/_bento/table/t?page=1&page_size=20&direction=asc"
        );
    }
}
