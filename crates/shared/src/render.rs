//! Fixed single-page A4 layout. The renderer never fails on a well-formed
//! payload; absent optional sections are simply left out.

use anyhow::{anyhow, Result};
use genpdf::elements::{Break, Paragraph};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::Style;
use genpdf::{Alignment, Document, Element, SimplePageDecorator};
use std::path::PathBuf;

use crate::models::{DailyContent, Highlight, Tier, WeatherSnapshot};

const FONT_FAMILY_NAME: &str = "LiberationSans";

/// Render the payload to PDF bytes.
pub fn render_pdf(content: &DailyContent) -> Result<Vec<u8>> {
    let mut doc = Document::new(load_fonts()?);
    doc.set_title(format!("The Daily - {}", content.date.format("%Y-%m-%d")));
    doc.set_paper_size(genpdf::PaperSize::A4);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(15);
    doc.set_page_decorator(decorator);

    let heading = Style::new().bold().with_font_size(13);
    let small = Style::new().with_font_size(9);

    // Masthead
    doc.push(
        Paragraph::new("THE DAILY")
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(24)),
    );
    doc.push(
        Paragraph::new(masthead_date(content))
            .aligned(Alignment::Center)
            .styled(Style::new().with_font_size(10)),
    );
    doc.push(Break::new(1));

    if let Some(weather) = &content.weather {
        doc.push(
            Paragraph::new(weather_line(weather))
                .aligned(Alignment::Center)
                .styled(small),
        );
        doc.push(Break::new(1));
    }

    doc.push(
        Paragraph::new(format!("\u{201c}{}\u{201d}", content.verse.text))
            .aligned(Alignment::Center)
            .styled(Style::new().italic().with_font_size(10)),
    );
    doc.push(
        Paragraph::new(format!("\u{2014} {}", content.verse.reference))
            .aligned(Alignment::Center)
            .styled(small),
    );
    doc.push(Break::new(1));

    for article in &content.articles {
        match article.tier {
            Tier::Top | Tier::Second => {
                doc.push(Paragraph::new(article.headline.as_str()).styled(heading));
                doc.push(
                    Paragraph::new(article.body.as_str())
                        .styled(Style::new().with_font_size(10)),
                );
                doc.push(Break::new(1));
            }
            Tier::Brief => {
                doc.push(
                    Paragraph::new(format!("\u{2022} {}", article.headline)).styled(small),
                );
            }
        }
    }
    doc.push(Break::new(1));

    if let Some(readings) = &content.readings {
        doc.push(Paragraph::new("Today's readings").styled(heading.with_font_size(11)));
        let references: Vec<&str> = [
            readings.old_testament.as_str(),
            readings.psalm.as_str(),
            readings.new_testament.as_str(),
        ]
        .into_iter()
        .filter(|r| !r.is_empty())
        .collect();
        let line = if references.is_empty() {
            "End of reading plan".to_string()
        } else {
            references.join(" \u{00b7} ")
        };
        doc.push(Paragraph::new(line).styled(small));
        doc.push(Break::new(1));
    }

    if let Some(highlight) = &content.highlight {
        doc.push(Paragraph::new("From the library").styled(heading.with_font_size(11)));
        doc.push(
            Paragraph::new(format!("\u{201c}{}\u{201d}", highlight.text))
                .styled(Style::new().italic().with_font_size(9)),
        );
        doc.push(Paragraph::new(attribution(highlight)).styled(small));
    }

    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| anyhow!("PDF rendering failed: {e}"))?;
    Ok(buffer)
}

fn masthead_date(content: &DailyContent) -> String {
    content.date.format("%A %-d %B %Y").to_string()
}

fn weather_line(weather: &WeatherSnapshot) -> String {
    let mut line = format!("{}\u{00b0}C", weather.temperature);
    if let Some(feels_like) = weather.feels_like {
        line.push_str(&format!(" (feels like {feels_like}\u{00b0}C)"));
    }
    line.push_str(&format!(
        ", {} \u{00b7} High {}\u{00b0} Low {}\u{00b0}",
        weather.condition, weather.high, weather.low
    ));
    if !weather.sunrise.is_empty() && !weather.sunset.is_empty() {
        line.push_str(&format!(
            " \u{00b7} Sunrise {} Sunset {}",
            weather.sunrise, weather.sunset
        ));
    }
    line.push_str(&format!(" \u{00b7} {}", weather.location));
    line
}

fn attribution(highlight: &Highlight) -> String {
    format!("\u{2014} {}, {}", highlight.author, highlight.title)
}

/// A LiberationSans TrueType family, searched for in the working
/// directory, the config directory, then the system font directory.
/// Missing fonts are a delivery problem, not a content problem.
fn load_fonts() -> Result<FontFamily<FontData>> {
    let mut candidates = vec![PathBuf::from("fonts")];
    if let Some(config_dir) = dirs::config_dir() {
        candidates.push(config_dir.join("daily-print").join("fonts"));
    }
    candidates.push(PathBuf::from("/usr/share/fonts/truetype/liberation"));

    for dir in &candidates {
        if dir.join(format!("{FONT_FAMILY_NAME}-Regular.ttf")).exists() {
            return genpdf::fonts::from_files(dir, FONT_FAMILY_NAME, None)
                .map_err(|e| anyhow!("Failed to load fonts from {}: {e}", dir.display()));
        }
    }

    anyhow::bail!(
        "PDF generation needs the {FONT_FAMILY_NAME} TrueType family; searched {}",
        candidates
            .iter()
            .map(|d| d.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_line_includes_every_field() {
        let line = weather_line(&WeatherSnapshot {
            temperature: 6,
            feels_like: Some(4),
            condition: "Overcast".to_string(),
            high: 9,
            low: 2,
            sunrise: "08:12".to_string(),
            sunset: "16:05".to_string(),
            location: "Witney, Oxfordshire".to_string(),
        });
        assert_eq!(
            line,
            "6\u{00b0}C (feels like 4\u{00b0}C), Overcast \u{00b7} High 9\u{00b0} Low 2\u{00b0} \
             \u{00b7} Sunrise 08:12 Sunset 16:05 \u{00b7} Witney, Oxfordshire"
        );
    }

    #[test]
    fn weather_line_omits_missing_extras() {
        let line = weather_line(&WeatherSnapshot {
            temperature: 6,
            feels_like: None,
            condition: "Clear sky".to_string(),
            high: 9,
            low: 2,
            sunrise: String::new(),
            sunset: String::new(),
            location: "Witney".to_string(),
        });
        assert_eq!(
            line,
            "6\u{00b0}C, Clear sky \u{00b7} High 9\u{00b0} Low 2\u{00b0} \u{00b7} Witney"
        );
    }

    #[test]
    fn highlight_attribution_names_author_and_title() {
        let line = attribution(&Highlight {
            text: "Quote".to_string(),
            title: "A Book".to_string(),
            author: "Someone".to_string(),
        });
        assert_eq!(line, "\u{2014} Someone, A Book");
    }
}
