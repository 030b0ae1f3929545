use crate::core::pipeline::RenderConfig;
use crate::pipeline::renderer::{FrameRenderer, SoftwareRenderer};
use crate::scene::camera::Camera;
use crate::scene::context::Scene;
use log::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderType {
    Software,
    Hardware,
}

/// Holds both pipelines and forwards each frame to the active one.
///
/// The hardware pipeline is optional and supplied from outside; without one
/// the manager stays on the software path.
pub struct RenderManager {
    software: SoftwareRenderer,
    hardware: Option<Box<dyn FrameRenderer>>,
    active: RenderType,
}

impl RenderManager {
    pub fn new(software: SoftwareRenderer) -> Self {
        Self {
            software,
            hardware: None,
            active: RenderType::Software,
        }
    }

    pub fn with_hardware(mut self, hardware: Box<dyn FrameRenderer>) -> Self {
        self.hardware = Some(hardware);
        self
    }

    pub fn active_type(&self) -> RenderType {
        self.active
    }

    pub fn software(&self) -> &SoftwareRenderer {
        &self.software
    }

    /// Switches between the two pipelines.
    pub fn toggle_renderer(&mut self) {
        self.active = match self.active {
            RenderType::Software if self.hardware.is_some() => RenderType::Hardware,
            RenderType::Software => {
                warn!("No hardware renderer available, staying on software");
                RenderType::Software
            }
            RenderType::Hardware => RenderType::Software,
        };
        info!("Renderer set to {}", self.active_renderer().name());
    }

    fn active_renderer(&self) -> &dyn FrameRenderer {
        match (self.active, &self.hardware) {
            (RenderType::Hardware, Some(hw)) => &**hw,
            _ => &self.software,
        }
    }

    fn active_renderer_mut(&mut self) -> &mut dyn FrameRenderer {
        match (self.active, &mut self.hardware) {
            (RenderType::Hardware, Some(hw)) => &mut **hw,
            _ => &mut self.software,
        }
    }

    pub fn update(&mut self, scene: &mut Scene, config: &RenderConfig, dt: f32) {
        self.active_renderer_mut().update(scene, config, dt);
    }

    pub fn render(&mut self, scene: &Scene, camera: &Camera, config: &RenderConfig) {
        self.active_renderer_mut().render(scene, camera, config);
    }

    pub fn frame(&self) -> &[u32] {
        self.active_renderer().frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct FlatRenderer {
        frame: Vec<u32>,
    }

    impl FrameRenderer for FlatRenderer {
        fn name(&self) -> &'static str {
            "flat"
        }
        fn update(&mut self, _: &mut Scene, _: &RenderConfig, _: f32) {}
        fn render(&mut self, _: &Scene, _: &Camera, _: &RenderConfig) {
            self.frame.fill(0xFF123456);
        }
        fn frame(&self) -> &[u32] {
            &self.frame
        }
    }

    #[test]
    fn stays_on_software_without_hardware() {
        let mut manager = RenderManager::new(SoftwareRenderer::new(4, 4).unwrap());
        manager.toggle_renderer();
        assert_eq!(manager.active_type(), RenderType::Software);
    }

    #[test]
    fn toggles_to_installed_hardware_and_back() {
        let hw = FlatRenderer {
            frame: vec![0; 16],
        };
        let mut manager =
            RenderManager::new(SoftwareRenderer::new(4, 4).unwrap()).with_hardware(Box::new(hw));
        manager.toggle_renderer();
        assert_eq!(manager.active_type(), RenderType::Hardware);

        let camera = Camera::new(nalgebra::Point3::origin(), 90.0, 1.0);
        manager.render(&Scene::new(), &camera, &RenderConfig::default());
        assert!(manager.frame().iter().all(|&p| p == 0xFF123456));

        manager.toggle_renderer();
        assert_eq!(manager.active_type(), RenderType::Software);
    }

    /// Records the transparency toggle of the last frame it was asked for.
    struct TransparencyRecorder {
        frame: Vec<u32>,
        seen: Rc<Cell<Option<bool>>>,
    }

    impl FrameRenderer for TransparencyRecorder {
        fn name(&self) -> &'static str {
            "recorder"
        }
        fn update(&mut self, _: &mut Scene, _: &RenderConfig, _: f32) {}
        fn render(&mut self, _: &Scene, _: &Camera, config: &RenderConfig) {
            self.seen.set(Some(config.show_transparent));
        }
        fn frame(&self) -> &[u32] {
            &self.frame
        }
    }

    #[test]
    fn hardware_renderer_receives_the_transparency_toggle() {
        let seen = Rc::new(Cell::new(None));
        let hw = TransparencyRecorder {
            frame: vec![0; 16],
            seen: Rc::clone(&seen),
        };
        let mut manager =
            RenderManager::new(SoftwareRenderer::new(4, 4).unwrap()).with_hardware(Box::new(hw));
        manager.toggle_renderer();

        let camera = Camera::new(nalgebra::Point3::origin(), 90.0, 1.0);
        let mut config = RenderConfig::default();
        assert!(config.show_transparent);
        config.toggle_transparent();
        manager.render(&Scene::new(), &camera, &config);
        assert_eq!(seen.get(), Some(false));
    }
}
