//! Scene and HUD painted with egui.
//!
//! The game draws nothing but flat shapes and text, so the whole frame goes
//! through egui's painter instead of a sprite pipeline. egui still needs the
//! usual split around the render pass:
//!
//!   1. `prepare()` -- lay out shapes for the snapshot, tessellate
//!   2. `upload()`  -- upload textures and buffers (borrows the encoder)
//!   3. `paint()`   -- draw into a `RenderPass<'static>`
//!   4. `cleanup()` -- free textures egui dropped
//!
//! Layout is specified in physical pixels (the same space pointer positions
//! arrive in) and divided by the scale factor on the way into egui points.

use fia_core::world::FrameSnapshot;

const PLAYER_MARKER_PX: f32 = 150.0;
const BOSS_MARKER_PX: f32 = 220.0;
const BOSS_CENTER_Y_PX: f32 = 420.0;
const HEALTH_BAR_HEIGHT_PX: f32 = 24.0;
const HUD_LEFT_PX: f32 = 50.0;
const HUD_HEALTH_BASELINE_PX: f32 = 70.0;
const HUD_WEAPON_BASELINE_PX: f32 = 140.0;
const HUD_STATS_BASELINE_PX: f32 = 190.0;
const HUD_FONT_PX: f32 = 50.0;
const STATS_FONT_PX: f32 = 22.0;

const PLAYER_COLOR: egui::Color32 = egui::Color32::from_rgb(230, 110, 40);
const BOSS_COLOR: egui::Color32 = egui::Color32::from_rgb(90, 160, 70);
const BAR_BACK_COLOR: egui::Color32 = egui::Color32::from_rgb(70, 20, 20);
const BAR_FILL_COLOR: egui::Color32 = egui::Color32::from_rgb(200, 40, 40);
const DIM_TEXT_COLOR: egui::Color32 = egui::Color32::from_gray(140);

/// Background, rgb(30, 30, 30).
pub const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 30.0 / 255.0,
    g: 30.0 / 255.0,
    b: 30.0 / 255.0,
    a: 1.0,
};

/// Text lines of the HUD, top to bottom.
pub fn hud_lines(frame: &FrameSnapshot) -> [String; 3] {
    let stats = &frame.stats;
    [
        format!("Health: {}", frame.player_health),
        format!("Weapon: {}", frame.weapon_label()),
        format!(
            "tick {}  {:.1} fps  {:.2} ms  overruns {}",
            stats.tick, stats.smoothed_fps, stats.smoothed_frame_time_ms, stats.overruns
        ),
    ]
}

pub fn boss_caption(frame: &FrameSnapshot) -> String {
    if frame.enemy_alive {
        format!("{} {}", frame.enemy_name, frame.enemy_health)
    } else {
        format!("{} defeated", frame.enemy_name)
    }
}

pub struct Hud {
    pub egui_ctx: egui::Context,
    pub egui_renderer: egui_wgpu::Renderer,
}

impl Hud {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let egui_ctx = egui::Context::default();
        let egui_renderer = egui_wgpu::Renderer::new(device, surface_format, None, 1, false);
        Self {
            egui_ctx,
            egui_renderer,
        }
    }

    pub fn prepare(
        &mut self,
        frame: &FrameSnapshot,
        size_in_pixels: (u32, u32),
        pixels_per_point: f32,
    ) -> (Vec<egui::ClippedPrimitive>, egui::TexturesDelta) {
        let screen_points = egui::vec2(
            size_in_pixels.0 as f32 / pixels_per_point,
            size_in_pixels.1 as f32 / pixels_per_point,
        );
        let mut raw_input = egui::RawInput {
            screen_rect: Some(egui::Rect::from_min_size(egui::Pos2::ZERO, screen_points)),
            ..Default::default()
        };
        raw_input
            .viewports
            .entry(egui::ViewportId::ROOT)
            .or_default()
            .native_pixels_per_point = Some(pixels_per_point);

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            paint_frame(ctx, frame, size_in_pixels, pixels_per_point);
        });

        let primitives = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        (primitives, full_output.textures_delta)
    }

    /// Upload textures and update buffers. Call before beginning the render pass.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        primitives: &[egui::ClippedPrimitive],
        textures_delta: &egui::TexturesDelta,
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        for (id, image_delta) in &textures_delta.set {
            self.egui_renderer
                .update_texture(device, queue, *id, image_delta);
        }

        self.egui_renderer
            .update_buffers(device, queue, encoder, primitives, screen_descriptor);
    }

    pub fn paint(
        &self,
        render_pass: &mut wgpu::RenderPass<'static>,
        primitives: &[egui::ClippedPrimitive],
        screen_descriptor: &egui_wgpu::ScreenDescriptor,
    ) {
        self.egui_renderer
            .render(render_pass, primitives, screen_descriptor);
    }

    pub fn cleanup(&mut self, textures_delta: &egui::TexturesDelta) {
        for id in &textures_delta.free {
            self.egui_renderer.free_texture(id);
        }
    }
}

fn paint_frame(
    ctx: &egui::Context,
    frame: &FrameSnapshot,
    size_in_pixels: (u32, u32),
    pixels_per_point: f32,
) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    let pos = |x: f32, y: f32| egui::pos2(x / pixels_per_point, y / pixels_per_point);
    let square = |cx: f32, cy: f32, side: f32| {
        let half = side / 2.0;
        egui::Rect::from_min_max(pos(cx - half, cy - half), pos(cx + half, cy + half))
    };
    let font = |px: f32| egui::FontId::monospace(px / pixels_per_point);

    // Boss, top center.
    let boss_x = size_in_pixels.0 as f32 / 2.0;
    let boss_top = BOSS_CENTER_Y_PX - BOSS_MARKER_PX / 2.0;
    if frame.enemy_alive {
        painter.rect_filled(
            square(boss_x, BOSS_CENTER_Y_PX, BOSS_MARKER_PX),
            egui::CornerRadius::same(16),
            BOSS_COLOR,
        );

        let bar_left = boss_x - BOSS_MARKER_PX / 2.0;
        let bar_top = boss_top - HEALTH_BAR_HEIGHT_PX * 2.0;
        let bar_back = egui::Rect::from_min_max(
            pos(bar_left, bar_top),
            pos(bar_left + BOSS_MARKER_PX, bar_top + HEALTH_BAR_HEIGHT_PX),
        );
        painter.rect_filled(bar_back, egui::CornerRadius::ZERO, BAR_BACK_COLOR);
        let fill_width = BOSS_MARKER_PX * frame.enemy_health.fraction();
        let bar_fill = egui::Rect::from_min_max(
            pos(bar_left, bar_top),
            pos(bar_left + fill_width, bar_top + HEALTH_BAR_HEIGHT_PX),
        );
        painter.rect_filled(bar_fill, egui::CornerRadius::ZERO, BAR_FILL_COLOR);
        painter.text(
            pos(boss_x, bar_top - 8.0),
            egui::Align2::CENTER_BOTTOM,
            boss_caption(frame),
            font(STATS_FONT_PX),
            egui::Color32::WHITE,
        );
    } else {
        painter.text(
            pos(boss_x, BOSS_CENTER_Y_PX),
            egui::Align2::CENTER_CENTER,
            boss_caption(frame),
            font(STATS_FONT_PX * 1.5),
            DIM_TEXT_COLOR,
        );
    }

    // Player marker follows the pointer.
    painter.rect_filled(
        square(frame.pointer.x, frame.pointer.y, PLAYER_MARKER_PX),
        egui::CornerRadius::same(12),
        PLAYER_COLOR,
    );

    let [health_line, weapon_line, stats_line] = hud_lines(frame);
    painter.text(
        pos(HUD_LEFT_PX, HUD_HEALTH_BASELINE_PX),
        egui::Align2::LEFT_BOTTOM,
        health_line,
        font(HUD_FONT_PX),
        egui::Color32::WHITE,
    );
    painter.text(
        pos(HUD_LEFT_PX, HUD_WEAPON_BASELINE_PX),
        egui::Align2::LEFT_BOTTOM,
        weapon_line,
        font(HUD_FONT_PX),
        egui::Color32::WHITE,
    );
    painter.text(
        pos(HUD_LEFT_PX, HUD_STATS_BASELINE_PX),
        egui::Align2::LEFT_BOTTOM,
        stats_line,
        font(STATS_FONT_PX),
        DIM_TEXT_COLOR,
    );
}
