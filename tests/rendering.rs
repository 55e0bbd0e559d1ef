use sha2::{Digest, Sha256};
use superstore_report::builder::{self, PdfBuilder};
use superstore_report::fonts;
use superstore_report::insights::{Insights, TopGroup};
use superstore_report::metrics::ModelMetrics;
use superstore_report::narrative;

fn sample_insights() -> Insights {
    Insights {
        sales_skew: 2.31,
        profit_skew: 7.56,
        sales_profit_corr: 0.48,
        top_segment: "Consumer".to_string(),
        top_region: "West".to_string(),
        top_ship_mode: "Standard Class".to_string(),
        total_sales: 2_297_200.86,
        total_profit: 286_397.02,
        profit_margin: 12.47,
        top_category_by_sales: TopGroup {
            label: "Technology".to_string(),
            value: 836_154.03,
        },
        top_category_by_profit: TopGroup {
            label: "Technology".to_string(),
            value: 145_454.95,
        },
        top_region_by_profit: TopGroup {
            label: "West".to_string(),
            value: 108_418.45,
        },
        top_segment_by_profit: TopGroup {
            label: "Consumer".to_string(),
            value: 134_119.21,
        },
    }
}

fn render_sample_report() -> Option<Vec<u8>> {
    if !fonts::fonts_available() {
        eprintln!(
            "Skipping render: report fonts missing. Set {} or copy the Roboto faces into assets/fonts.",
            fonts::FONTS_DIR_ENV
        );
        return None;
    }

    let report = narrative::compose(&sample_insights(), &ModelMetrics::default());
    let pdf = PdfBuilder::new().render(&report).expect("render report");
    Some(pdf.bytes)
}

fn scrub_pdf(bytes: &[u8]) -> Vec<u8> {
    fn scrub_segment(data: &mut [u8], tag: &[u8], terminator: u8) {
        let mut index = 0;
        while index + tag.len() < data.len() {
            if data[index..].starts_with(tag) {
                let mut cursor = index + tag.len();
                while cursor < data.len() {
                    let byte = data[cursor];
                    if byte == terminator {
                        break;
                    }
                    if terminator == b')' {
                        data[cursor] = b'0';
                    } else if !matches!(byte, b'<' | b'>' | b' ' | b'\n' | b'\r' | b'\t') {
                        data[cursor] = b'0';
                    }
                    cursor += 1;
                }
                index = cursor;
            } else {
                index += 1;
            }
        }
    }

    let mut normalized = bytes.to_vec();
    scrub_segment(&mut normalized, b"/CreationDate(", b')');
    scrub_segment(&mut normalized, b"/ModDate(", b')');
    scrub_segment(&mut normalized, b"/ID[", b']');
    scrub_segment(&mut normalized, b"/Producer(", b')');
    normalized
}

fn normalized_hash(bytes: &[u8]) -> [u8; 32] {
    let normalized = scrub_pdf(bytes);
    Sha256::digest(&normalized).into()
}

#[test]
fn renders_non_empty_output() {
    let Some(bytes) = render_sample_report() else {
        return;
    };
    assert!(
        !bytes.is_empty(),
        "rendered PDF should contain at least a header"
    );
    assert!(bytes.starts_with(b"%PDF"), "output should be a PDF file");
}

#[test]
fn rendering_is_deterministic() {
    let Some(bytes_a) = render_sample_report() else {
        return;
    };
    let Some(bytes_b) = render_sample_report() else {
        return;
    };

    assert_eq!(bytes_a.len(), bytes_b.len(), "PDF sizes should match");
    assert_eq!(
        normalized_hash(&bytes_a),
        normalized_hash(&bytes_b),
        "PDF renders must be deterministic after metadata normalization"
    );
}

#[test]
fn write_report_creates_parent_directories() {
    if !fonts::fonts_available() {
        eprintln!(
            "Skipping write_report test: report fonts missing. Set {} or copy the Roboto faces into assets/fonts.",
            fonts::FONTS_DIR_ENV
        );
        return;
    }

    let report = narrative::compose(&sample_insights(), &ModelMetrics::default());
    let dir = tempfile::tempdir().expect("create temp dir");
    let output = dir.path().join("results/reports/final_report.pdf");

    builder::write_report(&report, &output).expect("write report");
    let written = std::fs::read(&output).expect("read written report");
    assert!(!written.is_empty());

    // A second run overwrites the file in place.
    builder::write_report(&report, &output).expect("overwrite report");
    let rewritten = std::fs::read(&output).expect("read rewritten report");
    assert_eq!(normalized_hash(&written), normalized_hash(&rewritten));
}
