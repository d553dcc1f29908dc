//! The desktop application: pick a function family, enter coefficients, read
//! the value table and graph, export a worksheet.

use std::{path::PathBuf, sync::Arc};

use iced::{
    Element, Font, Length, Task,
    alignment::Horizontal,
    font::Weight,
    widget::{Column, Row, button, column, container, row, scrollable, text, text_input},
};

use crate::{
    config::{ExportConfig, LayoutConfig},
    export::{ExportError, ExportRequest, Exporter},
    function::FunctionFamily,
    graph_widget::GraphWidget,
    input::{CalculationInput, Field},
    layout::{RenderPlan, layout},
    style::{Palette, PlotStyle},
    table::{SCREEN_PRECISION, ValueTable},
};

const TITLE: &str = "GraphToán THCS";
const SUBTITLE: &str = "Ứng dụng hỗ trợ học tập môn Toán";
const DISCLAIMER: &str =
    "Nội dung mang tính tham khảo, Thầy (Cô) nên đọc lại trước khi sử dụng.";
const QUADRATIC_NOTE: &str = "Hệ thống sẽ tự động lấy các điểm chuẩn: -2; -1; 0; 1; 2";

const BOLD: Font = Font {
    weight: Weight::Bold,
    ..Font::DEFAULT
};

/// Start the application window.
pub fn run() -> iced::Result {
    iced::application(App::new, App::update, App::view)
        .title(TITLE)
        .run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Input,
    Result,
}

#[derive(Debug, Clone)]
pub enum Message {
    SelectFamily(FunctionFamily),
    FieldChanged(Field, String),
    Calculate,
    /// Back to the form, keeping the entered values and the last result.
    EditInput,
    /// Back to the menu, discarding the form and the result.
    Home,
    Export,
    ExportFinished(Result<PathBuf, Arc<ExportError>>),
}

/// Line shown under the current screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Error(String),
    Saved(PathBuf),
}

/// The current calculation as shown on the result screen.
struct Outcome {
    table: ValueTable,
    plan: RenderPlan,
}

pub struct App {
    screen: Screen,
    input: Option<CalculationInput>,
    outcome: Option<Outcome>,
    status: Option<Status>,
    layout_config: LayoutConfig,
    exporter: Exporter,
    graph: GraphWidget,
    palette: Palette,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        let layout_config = LayoutConfig::default();
        let palette = Palette::default();
        let style = PlotStyle::from_palette(&palette);
        let export_config = ExportConfig::from_env();
        log::info!(
            "documents will be saved to {}",
            export_config.output_path().display()
        );

        Self {
            screen: Screen::Menu,
            input: None,
            outcome: None,
            status: None,
            graph: GraphWidget::new(layout_config.canvas_size as f32, style),
            exporter: Exporter::new(
                export_config,
                crate::export::PlottersRasterizer::new(style),
            ),
            layout_config,
            palette,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SelectFamily(family) => {
                self.input = Some(CalculationInput::new(family));
                self.clear_outcome();
                self.status = None;
                self.screen = Screen::Input;
            }
            Message::FieldChanged(field, value) => {
                if let Some(input) = &mut self.input {
                    input.set(field, value);
                }
            }
            Message::Calculate => self.calculate(),
            Message::EditInput => {
                self.status = None;
                self.screen = Screen::Input;
            }
            Message::Home => {
                self.input = None;
                self.clear_outcome();
                self.status = None;
                self.screen = Screen::Menu;
            }
            Message::Export => return self.export(),
            Message::ExportFinished(result) => {
                self.status = Some(match result {
                    Ok(path) => Status::Saved(path),
                    Err(err) => Status::Error(err.user_message().to_owned()),
                });
            }
        }
        Task::none()
    }

    fn clear_outcome(&mut self) {
        self.outcome = None;
        self.graph.set_plan(None);
    }

    /// Validate the form and replace the result. On failure the previous
    /// result stays as it was.
    fn calculate(&mut self) {
        let Some(input) = &self.input else {
            return;
        };
        let calculation = match input.validate_for(&self.layout_config) {
            Ok(calculation) => calculation,
            Err(err) => {
                self.status = Some(Status::Error(err.to_string()));
                return;
            }
        };
        let plan = match layout(
            &calculation.descriptor,
            calculation.points.as_slice(),
            &self.layout_config,
        ) {
            Ok(plan) => plan,
            Err(err) => {
                log::warn!("layout failed: {err}");
                self.status = Some(Status::Error(err.to_string()));
                return;
            }
        };

        let table = ValueTable::new(&calculation.descriptor, &plan.points, SCREEN_PRECISION);
        self.graph.set_plan(Some(plan.clone()));
        self.outcome = Some(Outcome { table, plan });
        self.status = None;
        self.screen = Screen::Result;
    }

    fn export(&mut self) -> Task<Message> {
        let Some(outcome) = &self.outcome else {
            return Task::none();
        };
        match self.exporter.begin(ExportRequest::new(outcome.plan.clone())) {
            Ok(pipeline) => {
                self.status = None;
                Task::perform(pipeline, |result| {
                    Message::ExportFinished(result.map_err(Arc::new))
                })
            }
            Err(err) => {
                self.status = Some(Status::Error(err.user_message().to_owned()));
                Task::none()
            }
        }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let body = match (self.screen, &self.input, &self.outcome) {
            (Screen::Input, Some(input), _) => self.view_input(input),
            (Screen::Result, _, Some(outcome)) => self.view_result(outcome),
            _ => self.view_menu(),
        };

        let header = column![
            text(TITLE).size(30).font(BOLD).color(self.palette.accent),
            text(SUBTITLE).size(14).color(self.palette.on_primary),
        ]
        .align_x(Horizontal::Center)
        .spacing(4);
        let primary = self.palette.primary;
        let header = container(header)
            .padding(16)
            .center_x(Length::Fill)
            .style(move |_| container::background(primary));

        let mut content = column![body].spacing(16).max_width(760);
        if let Some(status) = self.view_status() {
            content = content.push(status);
        }
        content = content.push(
            text(DISCLAIMER)
                .size(13)
                .color(self.palette.warning),
        );

        let background = self.palette.background;
        container(column![
            header,
            scrollable(container(content.padding(24)).center_x(Length::Fill))
        ])
        .width(Length::Fill)
        .height(Length::Fill)
        .style(move |_| container::background(background))
        .into()
    }

    fn view_menu(&self) -> Element<'_, Message> {
        let buttons = FunctionFamily::ALL.into_iter().map(|family| {
            button(
                container(
                    text(format!("Hàm số {}", family.template()))
                        .size(18)
                        .font(BOLD),
                )
                .center_x(Length::Fill),
            )
            .padding(14)
            .width(Length::Fill)
            .on_press(Message::SelectFamily(family))
            .into()
        });
        container(Column::with_children(buttons).spacing(16).max_width(380))
            .center_x(Length::Fill)
            .into()
    }

    fn view_input<'a>(&'a self, input: &'a CalculationInput) -> Element<'a, Message> {
        let family = input.family();
        let mut form = column![
            text(format!("Nhập liệu {}", family.template()))
                .size(20)
                .font(BOLD)
                .color(self.palette.primary)
        ]
        .spacing(12);

        if let Some(hint) = x_hint(family) {
            form = form.push(text(hint).size(13));
        }
        for (field, value) in input.fields() {
            form = form.push(
                row![
                    text(field.caption(family))
                        .font(BOLD)
                        .color(self.palette.primary)
                        .width(Length::Fixed(110.0)),
                    text_input(field.placeholder(), value)
                        .on_input(move |v| Message::FieldChanged(field, v))
                        .on_submit(Message::Calculate)
                        .padding(8)
                        .width(Length::Fill),
                ]
                .spacing(12)
                .align_y(iced::alignment::Vertical::Center),
            );
        }
        if family == FunctionFamily::Quadratic {
            form = form.push(text(QUADRATIC_NOTE).size(13).color(self.palette.primary));
        }

        form = form.push(
            row![
                button(text("Thực hiện").font(BOLD))
                    .padding(10)
                    .on_press(Message::Calculate),
                button(text("Quay lại"))
                    .padding(10)
                    .style(button::secondary)
                    .on_press(Message::Home),
            ]
            .spacing(12),
        );

        container(form.max_width(460))
            .padding(20)
            .center_x(Length::Fill)
            .into()
    }

    fn view_result<'a>(&'a self, outcome: &'a Outcome) -> Element<'a, Message> {
        let actions = row![
            button(text("Sửa số liệu").size(14))
                .style(button::secondary)
                .on_press(Message::EditInput),
            button(text("Trang chủ").size(14))
                .style(button::secondary)
                .on_press(Message::Home),
        ]
        .spacing(8);

        let export = button(text("Tải về file Word").font(BOLD))
            .padding(12)
            .on_press_maybe((!self.exporter.is_busy()).then_some(Message::Export));

        column![
            actions,
            self.view_table(&outcome.table),
            container(self.graph.view()).center_x(Length::Fill),
            container(export).center_x(Length::Fill),
        ]
        .spacing(16)
        .into()
    }

    fn view_table<'a>(&self, table: &'a ValueTable) -> Element<'a, Message> {
        let cell = |content: &'a str, label: bool| -> Element<'a, Message> {
            let content = text(content).size(15);
            let content = if label { content.font(BOLD) } else { content };
            container(content)
                .padding([6, 8])
                .width(Length::Fixed(if label { 150.0 } else { 80.0 }))
                .align_x(Horizontal::Center)
                .style(container::bordered_box)
                .into()
        };
        let row_of = |cells: Vec<&'a str>| {
            Row::with_children(
                cells
                    .into_iter()
                    .enumerate()
                    .map(|(i, c)| cell(c, i == 0)),
            )
        };

        let rows = column![
            row_of(table.x_row().collect()),
            row_of(table.y_row().collect())
        ];
        container(rows).center_x(Length::Fill).into()
    }

    fn view_status(&self) -> Option<Element<'_, Message>> {
        let status = self.status.as_ref()?;
        let line = match status {
            Status::Error(message) => text(message.as_str()).color(self.palette.warning),
            Status::Saved(path) => {
                text(format!("Đã lưu {}", path.display())).color(self.palette.primary)
            }
        };
        Some(line.size(15).font(BOLD).into())
    }
}

fn x_hint(family: FunctionFamily) -> Option<&'static str> {
    match family {
        FunctionFamily::Origin => Some("Nhập một giá trị x (Ngoài điểm O(0,0) mặc định)"),
        FunctionFamily::Affine => Some("Chọn hai giá trị x để vẽ đồ thị"),
        FunctionFamily::Quadratic => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app_with(family: FunctionFamily, fields: &[(Field, &str)]) -> App {
        let mut app = App::new();
        let _ = app.update(Message::SelectFamily(family));
        for (field, value) in fields {
            let _ = app.update(Message::FieldChanged(*field, (*value).to_owned()));
        }
        app
    }

    #[test]
    fn calculate_moves_to_result() {
        let mut app = app_with(FunctionFamily::Origin, &[(Field::A, "2"), (Field::X1, "3")]);
        assert_eq!(app.screen(), Screen::Input);
        let _ = app.update(Message::Calculate);
        assert_eq!(app.screen(), Screen::Result);
        assert!(app.graph.plan().is_some());
        let outcome = app.outcome.as_ref().unwrap();
        assert_eq!(
            outcome.table.y_row().collect::<Vec<_>>(),
            vec!["y = 2x", "0", "6"]
        );
    }

    #[test]
    fn rejected_input_keeps_previous_result() {
        let mut app = app_with(FunctionFamily::Quadratic, &[(Field::A, "1")]);
        let _ = app.update(Message::Calculate);
        let _ = app.update(Message::EditInput);
        let _ = app.update(Message::FieldChanged(Field::A, "abc".to_owned()));
        let _ = app.update(Message::Calculate);

        assert_eq!(app.screen(), Screen::Input);
        assert_eq!(
            app.status(),
            Some(&Status::Error(
                crate::input::ValidationError::InvalidCoefficientA.to_string()
            ))
        );
        let plan = app.graph.plan().unwrap();
        assert_eq!(
            plan.descriptor,
            crate::function::FunctionDescriptor::Quadratic { a: 1.0 }
        );
    }

    #[test]
    fn home_clears_everything() {
        let mut app = app_with(FunctionFamily::Quadratic, &[(Field::A, "1")]);
        let _ = app.update(Message::Calculate);
        let _ = app.update(Message::Home);
        assert_eq!(app.screen(), Screen::Menu);
        assert!(app.outcome.is_none());
        assert!(app.graph.plan().is_none());
    }

    #[test]
    fn export_failure_shows_retry_message() {
        let mut app = App::new();
        let _ = app.update(Message::ExportFinished(Err(Arc::new(ExportError::Busy))));
        assert_eq!(
            app.status(),
            Some(&Status::Error(crate::export::RETRY_MESSAGE.to_owned()))
        );
    }
}
