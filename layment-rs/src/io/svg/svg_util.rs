use std::fmt::{Display, Formatter};
use std::str::FromStr;

use anyhow::{Result, bail};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use svg::node::element::path::Data;
use svg::node::element::{Circle, Path};

use crate::geometry::Transformation;
use crate::geometry::primitives::{Point, Rect, Silhouette};

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgDrawOptions {
    ///The theme to use for the svg
    #[serde(default)]
    pub theme: SvgLayoutTheme,
    ///Draw the area along the layment edges that entities must keep clear of
    #[serde(default)]
    pub safe_area: bool,
    ///Draw the bounding box of every contour on top of its silhouette
    #[serde(default)]
    pub bboxes: bool,
    ///Draw the labels attached to the contours
    #[serde(default)]
    pub labels: bool,
    ///Draw highlighted entities in the highlight color
    #[serde(default)]
    pub highlight_offenders: bool,
}

impl Default for SvgDrawOptions {
    fn default() -> Self {
        Self {
            theme: SvgLayoutTheme::default(),
            safe_area: true,
            bboxes: false,
            labels: true,
            highlight_offenders: true,
        }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize, Deserialize, Copy)]
pub struct SvgLayoutTheme {
    pub stroke_width_multiplier: f32,
    pub layment_fill: Color,
    pub contour_fill: Color,
    pub primitive_fill: Color,
    pub label_color: Color,
    pub highlight_color: Color,
}

impl Default for SvgLayoutTheme {
    fn default() -> Self {
        SvgLayoutTheme::FOAM
    }
}

impl SvgLayoutTheme {
    pub const FOAM: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.0,
        layment_fill: Color(0x2D, 0x2D, 0x2D),
        contour_fill: Color(0xFF, 0xC8, 0x79),
        primitive_fill: Color(0x9E, 0xC9, 0xE2),
        label_color: Color(0xFF, 0xFF, 0xFF),
        highlight_color: Color(0xD0, 0x00, 0x00),
    };

    pub const GRAY: SvgLayoutTheme = SvgLayoutTheme {
        stroke_width_multiplier: 2.5,
        layment_fill: Color(0xD3, 0xD3, 0xD3),
        contour_fill: Color(0x7A, 0x7A, 0x7A),
        primitive_fill: Color(0x63, 0x63, 0x63),
        label_color: Color(0x00, 0x00, 0x00),
        highlight_color: Color(0xD0, 0x00, 0x00),
    };
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct Color(pub u8, pub u8, pub u8);

impl Display for Color {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.0, self.1, self.2)
    }
}

impl FromStr for Color {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if hex.len() != 6 || !hex.is_ascii() {
            bail!("invalid color: {s:?}, expected #RRGGBB");
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);
        Ok(Color(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl Serialize for Color {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Path data of every outline of `silhouette`, mapped through `t`.
pub fn silhouette_data(silhouette: &Silhouette, t: &Transformation) -> Data {
    let mut data = Data::new();
    for outline in silhouette.outlines() {
        let mut points = outline.iter().map(|p| t.apply(p.x(), p.y()));
        if let Some(first) = points.next() {
            data = data.move_to(first);
            for p in points {
                data = data.line_to(p);
            }
            data = data.close();
        }
    }
    data
}

pub fn data_to_path(data: Data, params: &[(&str, &str)]) -> Path {
    let mut path = Path::new();
    for param in params {
        path = path.set(param.0, param.1)
    }
    path.set("d", data)
}

pub fn circle(center: Point, radius: f32, params: &[(&str, &str)]) -> Circle {
    let mut circle = Circle::new()
        .set("cx", center.x())
        .set("cy", center.y())
        .set("r", radius);
    for param in params {
        circle = circle.set(param.0, param.1)
    }
    circle
}

pub fn aa_rect_data(rect: Rect) -> Data {
    Data::new()
        .move_to((rect.x_min, rect.y_min))
        .line_to((rect.x_max, rect.y_min))
        .line_to((rect.x_max, rect.y_max))
        .line_to((rect.x_min, rect.y_max))
        .close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("#FFC879", Some(Color(0xFF, 0xC8, 0x79)))]
    #[test_case("2d2d2d", Some(Color(0x2D, 0x2D, 0x2D)))]
    #[test_case("#FFF", None)]
    #[test_case("#GG0000", None)]
    #[test_case("#ÿÿÿ", None; "non ascii")]
    fn parse_color(s: &str, expected: Option<Color>) {
        assert_eq!(s.parse::<Color>().ok(), expected);
    }

    #[test]
    fn display_round_trips() {
        let c = Color(0x0A, 0xB0, 0xFF);
        assert_eq!(c.to_string(), "#0AB0FF");
        assert_eq!(c.to_string().parse::<Color>().unwrap(), c);
    }
}
