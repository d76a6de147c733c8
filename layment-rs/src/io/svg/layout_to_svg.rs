use svg::Document;
use svg::node::element::{Group, Text, Title};

use crate::entities::{Layout, PrimitiveShape};
use crate::geometry::geo_traits::Bounded;
use crate::geometry::scale::to_workspace;
use crate::io::svg::svg_util;
use crate::io::svg::svg_util::SvgDrawOptions;
use crate::util::EngineConfig;

/// Renders the layout as it currently is, in workspace units.
pub fn layout_to_svg(
    layout: &Layout,
    cfg: &EngineConfig,
    options: SvgDrawOptions,
    title: &str,
) -> Document {
    let scale = layout.scale();
    let layment = layout.layment();
    let layment_rect = layment.rect(scale);
    let theme = &options.theme;

    let vbox = layment_rect.inflate(to_workspace(layment.offset, scale));
    let stroke_width =
        f32::min(vbox.width(), vbox.height()) * 0.001 * theme.stroke_width_multiplier;
    let highlight = format!("{}", theme.highlight_color);
    let fill_of = |highlighted: bool, normal: String| match highlighted && options.highlight_offenders {
        true => highlight.clone(),
        false => normal,
    };

    let header = {
        let font_size = f32::min(layment_rect.width(), layment_rect.height()) * 0.025;
        let content = format!(
            "width: {:.0} mm | height: {:.0} mm | contours: {} | primitives: {} | {}",
            layment.width,
            layment.height,
            layout.contours().len(),
            layout.primitives().len(),
            title,
        );
        Text::new(content)
            .set("x", layment_rect.x_min)
            .set("y", layment_rect.y_min - 0.5 * font_size)
            .set("font-size", font_size)
            .set("font-family", "monospace")
            .set("font-weight", "500")
    };

    let layment_group = {
        let mut group = Group::new()
            .set("id", "layment")
            .add(svg_util::data_to_path(
                svg_util::aa_rect_data(layment_rect),
                &[
                    ("fill", &*format!("{}", theme.layment_fill)),
                    ("stroke", "black"),
                    ("stroke-width", &*format!("{}", 2.0 * stroke_width)),
                ],
            ))
            .add(Title::new(format!(
                "layment, {} x {} mm, material: {}",
                layment.width, layment.height, layout.base_material_color
            )));
        if options.safe_area {
            let safe_area = layment.safe_area(cfg.layment.padding, scale);
            group = group.add(svg_util::data_to_path(
                svg_util::aa_rect_data(safe_area),
                &[
                    ("fill", "none"),
                    ("stroke", "white"),
                    ("stroke-opacity", "0.4"),
                    ("stroke-width", &*format!("{}", stroke_width)),
                    ("stroke-dasharray", &*format!("{}", 5.0 * stroke_width)),
                ],
            ));
        }
        group
    };

    let contours_group = {
        let mut group = Group::new().set("id", "contours");
        for (contour, item) in layout.contours().iter_with_metadata() {
            let bbox = contour.bbox(scale);
            let fill = fill_of(contour.highlighted, format!("{}", theme.contour_fill));
            let style = [
                ("fill", &*fill),
                ("fill-rule", "nonzero"),
                ("fill-opacity", "0.8"),
                ("stroke", "black"),
                ("stroke-width", &*format!("{}", stroke_width)),
            ];
            let data = match &item.silhouette {
                Some(s) => svg_util::silhouette_data(s, &contour.transformation(s, scale)),
                None => svg_util::aa_rect_data(bbox),
            };
            let title = Title::new(format!(
                "contour {}, item: {}, article: {}, rotation: {}",
                contour.id, contour.catalog_id, item.article, contour.rotation
            ));
            group = group.add(svg_util::data_to_path(data, &style).add(title));
            if options.bboxes {
                group = group.add(svg_util::data_to_path(
                    svg_util::aa_rect_data(bbox),
                    &[
                        ("fill", "none"),
                        ("stroke", "black"),
                        ("stroke-opacity", "0.3"),
                        ("stroke-width", &*format!("{}", 0.5 * stroke_width)),
                        (
                            "stroke-dasharray",
                            &*format!("{} {}", 1.0 * stroke_width, 2.0 * stroke_width),
                        ),
                    ],
                ));
            }
        }
        group
    };

    let primitives_group = {
        let mut group = Group::new().set("id", "primitives");
        for (_, primitive) in layout.primitives().iter() {
            let fill = fill_of(primitive.highlighted, format!("{}", theme.primitive_fill));
            let style = [
                ("fill", &*fill),
                ("fill-opacity", "0.8"),
                ("stroke", "black"),
                ("stroke-width", &*format!("{}", stroke_width)),
            ];
            group = match primitive.shape {
                PrimitiveShape::Rect { .. } => {
                    let bbox = primitive.bbox();
                    group.add(svg_util::data_to_path(svg_util::aa_rect_data(bbox), &style))
                }
                PrimitiveShape::Circle { radius } => {
                    group.add(svg_util::circle(primitive.position, radius, &style))
                }
            };
        }
        group
    };

    let labels_group = options.labels.then(|| {
        let color = format!("{}", theme.label_color);
        layout
            .labels()
            .iter()
            .fold(Group::new().set("id", "labels"), |group, (_, label)| {
                let font_size = to_workspace(label.font_size_mm, scale);
                let line_height = font_size * cfg.labels.line_height;
                label.text.lines().enumerate().fold(group, |group, (i, line)| {
                    group.add(
                        Text::new(line)
                            .set("x", label.position.x())
                            .set("y", label.position.y() + font_size + i as f32 * line_height)
                            .set("font-size", font_size)
                            .set("font-family", "monospace")
                            .set("fill", &*color),
                    )
                })
            })
    });

    let vbox_svg = (vbox.x_min, vbox.y_min, vbox.width(), vbox.height());

    let document = Document::new()
        .set("viewBox", vbox_svg)
        .add(layment_group)
        .add(primitives_group)
        .add(contours_group);

    match labels_group {
        Some(labels) => document.add(labels).add(header),
        None => document.add(header),
    }
}
