use crate::render_body;
use mailsift_analysis::{SummaryView, ThemeCard};
use mailsift_core::text::{escape_html, truncate_id};
use mailsift_core::{EmailDetail, Filter, FilterAction, SearchHit};
use regex::Regex;
use std::sync::LazyLock;

static REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9a-f]{64}\b").expect("static regex"));

const ID_DISPLAY_LEN: usize = 20;

fn row(label: &str, value: &str) -> String {
    format!(
        "<dt>{}</dt><dd>{}</dd>",
        escape_html(label),
        escape_html(value)
    )
}

/// The detail overlay for one email. Field order is fixed so the overlay
/// reads the same for every message regardless of which fields are empty.
/// The root carries the email's identifier so the embedding shell can wire
/// the "not relevant" button without re-deriving it.
pub fn render_email_detail(detail: &EmailDetail) -> String {
    let mut out = format!(
        "<dl class=\"email-detail\" data-ident=\"{}\">",
        escape_html(detail.ident().as_str())
    );
    out.push_str(&row("Índice", detail.index.as_deref().unwrap_or("")));
    out.push_str(&row("ID", &detail.message_id));
    out.push_str(&row("De", &detail.from));
    out.push_str(&row("Para", &detail.to));
    out.push_str(&row("Asunto", &detail.subject));
    out.push_str(&row("Fecha", &detail.date));
    out.push_str(&row("Resumen", &detail.summary));
    out.push_str(&format!(
        "<dt>Cuerpo</dt><dd>{}</dd>",
        render_body(&detail.body)
    ));
    out.push_str(&row("Adjuntos", &detail.attachments_content));
    out.push_str("</dl>");
    out
}

/// One page of search hits as table rows. Long message ids get a middle
/// ellipsis; the full id stays in the title attribute.
pub fn render_result_table(hits: &[SearchHit]) -> String {
    let mut out = String::from(
        "<table class=\"results\"><thead><tr>\
         <th>ID</th><th>Fecha</th><th>De</th><th>Asunto</th><th>Relevancia</th>\
         </tr></thead><tbody>",
    );
    for hit in hits {
        let shown = truncate_id(&hit.message_id, ID_DISPLAY_LEN);
        out.push_str(&format!(
            "<tr data-ident=\"{}\">\
             <td title=\"{id}\">{}</td><td>{}</td><td>{}</td><td>{}</td><td>{:.0}</td>\
             </tr>",
            escape_html(hit.ident().as_str()),
            escape_html(&shown),
            escape_html(&hit.date),
            escape_html(&hit.from),
            escape_html(&hit.subject),
            hit.relevance,
            id = escape_html(&hit.message_id),
        ));
    }
    out.push_str("</tbody></table>");
    out
}

/// Active filters as list items, each with its server-reported match count.
pub fn render_filter_list(filters: &[(Filter, u64)]) -> String {
    let mut out = String::from("<ul class=\"filters\">");
    for (filter, count) in filters {
        let label = match filter.action {
            FilterAction::Add => "Añadir",
            FilterAction::Remove => "Eliminar",
        };
        out.push_str(&format!(
            "<li>{label}: {} ({count})</li>",
            escape_html(&filter.terms.join(", "))
        ));
    }
    out.push_str("</ul>");
    out
}

fn render_summary(summary: &SummaryView) -> String {
    match summary {
        SummaryView::Bullets(items) => {
            let mut out = String::from("<ul>");
            for item in items {
                out.push_str(&format!("<li>{}</li>", escape_html(item)));
            }
            out.push_str("</ul>");
            out
        }
        SummaryView::Paragraph(text) => format!("<p>{}</p>", escape_html(text)),
    }
}

/// Theme analysis results as collapsible cards. Each card lists its emails
/// so a row can be clicked open from inside the card.
pub fn render_theme_cards(cards: &[ThemeCard]) -> String {
    let mut out = String::from("<div class=\"themes\">");
    for card in cards {
        out.push_str(&format!(
            "<details data-theme=\"{}\"><summary>{} [{}]{}</summary>{}",
            escape_html(&card.theme_id),
            escape_html(&card.title),
            escape_html(&card.status),
            card.similarity_score
                .map(|score| format!(" ({score:.2})"))
                .unwrap_or_default(),
            render_summary(&card.summary),
        ));
        out.push_str("<ul class=\"theme-emails\">");
        for email in &card.emails {
            out.push_str(&format!(
                "<li data-ident=\"{}\">{} · {}</li>",
                escape_html(
                    mailsift_core::EmailIdent::from_parts(
                        email.index.as_deref(),
                        &email.message_id
                    )
                    .as_str()
                ),
                escape_html(&email.from),
                escape_html(&email.subject),
            ));
        }
        out.push_str("</ul></details>");
    }
    out.push_str("</div>");
    out
}

/// Deep-analysis reasoning text with every embedded message id turned into
/// an in-page anchor. Escaping happens first; hex ids contain nothing the
/// escaper rewrites, so the ids still match afterwards.
pub fn render_reasoning(reasoning: &str) -> String {
    let escaped = escape_html(reasoning);
    REFERENCE_RE
        .replace_all(&escaped, |caps: &regex::Captures<'_>| {
            let id = &caps[0];
            format!(
                "<a href=\"#email-{id}\">{}</a>",
                truncate_id(id, ID_DISPLAY_LEN)
            )
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mailsift_core::EmailRef;

    const REF_ID: &str = "5d41402abc4b2a76b9719d911017c59277bf035e6a79b1a6e8f4c19c2a4b7f03";

    fn hit(message_id: &str, subject: &str) -> SearchHit {
        SearchHit {
            message_id: message_id.to_string(),
            subject: subject.to_string(),
            from: "ana@x.es".to_string(),
            date: "2024-05-01".to_string(),
            relevance: 87.0,
            ..Default::default()
        }
    }

    #[test]
    fn detail_fields_are_escaped_in_fixed_order() {
        let detail = EmailDetail {
            message_id: "m<1>".to_string(),
            from: "ana@x.es".to_string(),
            subject: "Q&A".to_string(),
            body: "hola".to_string(),
            ..Default::default()
        };
        let out = render_email_detail(&detail);
        assert!(out.contains("data-ident=\"m&lt;1&gt;\""));
        assert!(out.contains("<dt>ID</dt><dd>m&lt;1&gt;</dd>"));
        assert!(out.contains("<dt>Asunto</dt><dd>Q&amp;A</dd>"));
        let id_at = out.find("<dt>ID</dt>").unwrap();
        let body_at = out.find("<dt>Cuerpo</dt>").unwrap();
        let attachments_at = out.find("<dt>Adjuntos</dt>").unwrap();
        assert!(id_at < body_at && body_at < attachments_at);
    }

    #[test]
    fn detail_ident_prefers_the_index() {
        let detail = EmailDetail {
            message_id: "m1".to_string(),
            index: Some("3".to_string()),
            ..Default::default()
        };
        assert!(render_email_detail(&detail).contains("data-ident=\"3\""));
    }

    #[test]
    fn detail_body_is_sanitized() {
        let detail = EmailDetail {
            body: "<p>hola</p><script>x()</script>".to_string(),
            ..Default::default()
        };
        let out = render_email_detail(&detail);
        assert!(out.contains("<p>hola</p>"));
        assert!(!out.contains("script"));
    }

    #[test]
    fn result_rows_truncate_long_ids_but_keep_full_title() {
        let out = render_result_table(&[hit(REF_ID, "Factura")]);
        assert!(out.contains(&format!("title=\"{REF_ID}\"")));
        assert!(out.contains('…'));
        assert!(!out.contains(&format!(">{REF_ID}<")));
        assert!(out.contains("<td>Factura</td>"));
        assert!(out.contains("<td>87</td>"));
    }

    #[test]
    fn result_rows_escape_subjects() {
        let out = render_result_table(&[hit("m1", "<b>oferta</b>")]);
        assert!(out.contains("&lt;b&gt;oferta&lt;/b&gt;"));
        assert!(!out.contains("<b>oferta</b>"));
    }

    #[test]
    fn filter_list_shows_action_terms_and_count() {
        let filters = vec![
            (
                Filter {
                    action: FilterAction::Remove,
                    terms: vec!["reunión".to_string(), "proyecto".to_string()],
                },
                3,
            ),
            (
                Filter {
                    action: FilterAction::Add,
                    terms: vec!["viaje".to_string()],
                },
                0,
            ),
        ];
        let out = render_filter_list(&filters);
        assert!(out.contains("<li>Eliminar: reunión, proyecto (3)</li>"));
        assert!(out.contains("<li>Añadir: viaje (0)</li>"));
    }

    #[test]
    fn theme_cards_render_bullets_and_email_rows() {
        let card = ThemeCard {
            theme_id: "t1".to_string(),
            title: "Facturación".to_string(),
            status: "abierto".to_string(),
            summary: SummaryView::Bullets(vec!["dos facturas".to_string()]),
            emails: vec![EmailRef {
                message_id: "m1".to_string(),
                from: "ana@x.es".to_string(),
                subject: "Factura 7".to_string(),
                ..Default::default()
            }],
            similarity_score: Some(0.82),
        };
        let out = render_theme_cards(&[card]);
        assert!(out.contains("<summary>Facturación [abierto] (0.82)</summary>"));
        assert!(out.contains("<li>dos facturas</li>"));
        assert!(out.contains("Factura 7"));
    }

    #[test]
    fn reasoning_links_each_reference_once_per_occurrence() {
        let text = format!("El correo '{REF_ID}' responde a '{REF_ID}'.");
        let out = render_reasoning(&text);
        assert_eq!(out.matches(&format!("href=\"#email-{REF_ID}\"")).count(), 2);
        assert!(out.contains('…'));
    }

    #[test]
    fn reasoning_without_references_is_plain_escaped_text() {
        assert_eq!(render_reasoning("a < b"), "a &lt; b");
    }
}
