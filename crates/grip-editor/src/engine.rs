//! The interaction engine: one per canvas.
//!
//! Routes normalized input to the drag and resize controllers, applies
//! live feedback to the view, and funnels every session end through the
//! commit gateway. Hosts call `handle` for each input event and attach
//! window-level move/up listeners only while `wants_window_events()`.

use crate::commit::{Commit, CommitGateway, CommitOutcome, CommitRequest, clear_session_styling};
use crate::config::{ConfigError, GripConfig, ItemProps, PropsTable};
use crate::drag::{DragController, DragRelease, DragSession, DragStep};
use crate::events::{EngineEvent, Events, SessionKind};
use crate::input::{InputEvent, Modifiers};
use crate::registry::ActiveSessionRegistry;
use crate::resize::{ResizeController, ResizeSession};
use crate::store::ItemStore;
use crate::view::{DRAGGING_CLASS, RESIZING_CLASS, ViewLayer};
use grip_core::{
    Cursor, HandlePosition, Item, ItemId, Point, PointerTarget, Rect, Size, SizeLimits, Viewport,
    hit, resolve,
};

#[derive(Debug, Default)]
pub struct InteractionEngine {
    config: GripConfig,
    props: PropsTable,
    registry: ActiveSessionRegistry,
    drag: DragController,
    resize: ResizeController,
    gateway: CommitGateway,
    /// Last pointer location the active session has seen.
    last_pointer: Option<Point>,
}

impl InteractionEngine {
    pub fn new(config: GripConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &GripConfig {
        &self.config
    }

    pub fn set_item_props(&mut self, item: ItemId, props: ItemProps) -> Result<(), ConfigError> {
        self.props.set(item, props)
    }

    pub fn remove_item_props(&mut self, item: ItemId) {
        self.props.remove(item);
    }

    pub fn item_props(&self, item: ItemId) -> ItemProps {
        self.props.get(item)
    }

    /// Minimum size for `item`: its own override, then its kind, then the default.
    pub fn limits_for(&self, item: &Item) -> SizeLimits {
        self.props
            .get(item.id)
            .limits
            .unwrap_or_else(|| self.config.limits_for_kind(&item.kind))
    }

    /// Window-level pointer listeners are needed only during a session.
    pub fn wants_window_events(&self) -> bool {
        self.registry.is_active()
    }

    pub fn active_item(&self) -> Option<ItemId> {
        self.registry.active_item()
    }

    pub fn active_kind(&self) -> Option<SessionKind> {
        self.registry.active_kind()
    }

    /// `true` once an armed drag has crossed the threshold.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    /// Classify a screen `point` against `item` by geometry alone, for hosts
    /// without a DOM to inspect. `drag_region` is the drag handle's screen
    /// rectangle; `None` makes the whole item draggable.
    pub fn hit_test<V>(
        &self,
        item: &Item,
        view: &V,
        drag_region: Option<Rect>,
        point: Point,
    ) -> Option<PointerTarget>
    where
        V: ViewLayer + ?Sized,
    {
        let viewport = resolve(view)?;
        let measured = view.measure(item.id).unwrap_or(Size::ZERO);
        let size = Size::new(
            item.dimensions.width.or_measured(measured.width),
            item.dimensions.height.or_measured(measured.height),
        );
        let rect = hit::item_screen_rect(&viewport, item.position.to_point(), size);
        hit::classify(
            rect,
            drag_region,
            point,
            self.props.get(item.id).resizable,
            self.config.handle_zone,
        )
    }

    pub fn handle<S, V>(&mut self, event: &InputEvent, store: &mut S, view: &mut V) -> Events
    where
        S: ItemStore + ?Sized,
        V: ViewLayer + ?Sized,
    {
        let mut events = Events::new();
        match *event {
            InputEvent::PointerDown {
                item,
                target,
                x,
                y,
                modifiers,
            } => {
                let screen = Point::new(x, y);
                self.pointer_down(item, target, screen, modifiers, store, view, &mut events);
            }
            InputEvent::PointerMove { x, y, .. } => {
                self.pointer_move(Point::new(x, y), store, view, &mut events);
            }
            InputEvent::PointerUp { x, y, .. } => {
                self.pointer_up(Point::new(x, y), store, view, &mut events);
            }
            InputEvent::DoubleClick {
                item,
                x,
                y,
                modifiers,
            } => {
                if !self.registry.is_active() {
                    events.push(EngineEvent::DoubleClick {
                        item,
                        x,
                        y,
                        modifiers,
                    });
                }
            }
            InputEvent::Cancel => {
                if self.config.cancel_on_escape {
                    self.cancel(view, &mut events);
                }
            }
            InputEvent::Unmount { item } => {
                if self.registry.active_item() == Some(item) {
                    log::debug!("{item:?} unmounted mid-session, aborting");
                    self.abort(view);
                }
            }
            InputEvent::Teardown => self.abort(view),
        }
        events
    }

    // ─── Pointer down ────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn pointer_down<S, V>(
        &mut self,
        id: ItemId,
        target: PointerTarget,
        screen: Point,
        modifiers: Modifiers,
        store: &mut S,
        view: &mut V,
        events: &mut Events,
    ) where
        S: ItemStore + ?Sized,
        V: ViewLayer + ?Sized,
    {
        if self.registry.is_active() {
            log::debug!("pointer-down on {id:?} ignored, session in progress");
            return;
        }
        let handle = match target {
            PointerTarget::DragHandle => None,
            PointerTarget::ResizeHandle(handle) if self.props.get(id).resizable => Some(handle),
            PointerTarget::ResizeHandle(_) | PointerTarget::Control | PointerTarget::Body => {
                log::trace!("pointer-down on {id:?} ({target:?}) starts nothing");
                return;
            }
        };
        let Some((item, viewport)) = self.lookup(id, &*store, &*view) else {
            return;
        };

        match handle {
            None => self.begin_drag(item, screen, modifiers, &viewport),
            Some(handle) => {
                self.begin_resize(item, handle, screen, &viewport, store, view, events);
            }
        }
        if self.registry.is_active() {
            self.last_pointer = Some(screen);
        }
    }

    /// The store record, a mounted element, and a resolvable canvas.
    fn lookup<S, V>(&self, id: ItemId, store: &S, view: &V) -> Option<(Item, Viewport)>
    where
        S: ItemStore + ?Sized,
        V: ViewLayer + ?Sized,
    {
        let Some(item) = store.item(id) else {
            log::warn!("pointer-down on unknown item {id:?}");
            return None;
        };
        if !view.is_mounted(id) {
            log::debug!("pointer-down on unmounted item {id:?}");
            return None;
        }
        let Some(viewport) = resolve(view) else {
            log::debug!("no canvas for {id:?}");
            return None;
        };
        Some((item, viewport))
    }

    fn begin_drag(&mut self, item: Item, screen: Point, modifiers: Modifiers, viewport: &Viewport) {
        let Some(handle) = self.registry.try_acquire(item.id, SessionKind::Drag) else {
            return;
        };
        let top_left = viewport.canvas_to_screen(item.position.to_point());
        let offset = screen - top_left;
        self.drag
            .arm(DragSession::new(handle, screen, modifiers, offset, item.position));
    }

    #[allow(clippy::too_many_arguments)]
    fn begin_resize<S, V>(
        &mut self,
        item: Item,
        handle: HandlePosition,
        screen: Point,
        viewport: &Viewport,
        store: &mut S,
        view: &mut V,
        events: &mut Events,
    ) where
        S: ItemStore + ?Sized,
        V: ViewLayer + ?Sized,
    {
        let limits = self.limits_for(&item);
        let Some(session_handle) = self.registry.try_acquire(item.id, SessionKind::Resize) else {
            return;
        };
        let measured = view.measure(item.id);
        let session = ResizeSession::start(&item, handle, screen, viewport, measured, limits);
        self.resize.begin(session_handle, session);

        store.bring_to_front(item.id);
        view.set_class(item.id, RESIZING_CLASS, true);
        view.set_transitions(item.id, false);
        view.set_cursor(Some(handle.cursor()));
        events.push(EngineEvent::ResizeStart {
            item: item.id,
            handle,
        });
    }

    // ─── Pointer move ────────────────────────────────────────────────────

    fn pointer_move<S, V>(
        &mut self,
        screen: Point,
        store: &mut S,
        view: &mut V,
        events: &mut Events,
    ) where
        S: ItemStore + ?Sized,
        V: ViewLayer + ?Sized,
    {
        let Some(active) = self.registry.active_item() else {
            return;
        };
        self.last_pointer = Some(screen);
        if !view.is_mounted(active) {
            return;
        }
        // Re-resolved every tick so a zoom mid-gesture is honoured.
        let Some(viewport) = resolve(&*view) else {
            log::trace!("canvas gone, skipping move");
            return;
        };

        if self.drag.is_active() {
            match self.drag.pointer_move(screen, &viewport, self.config.drag_threshold) {
                DragStep::Ignored => {}
                DragStep::Started { item, position } => {
                    store.bring_to_front(item);
                    view.set_class(item, DRAGGING_CLASS, true);
                    view.set_transitions(item, false);
                    view.set_cursor(Some(Cursor::Grabbing));
                    view.set_position(item, position);
                    events.push(EngineEvent::DragStart { item });
                }
                DragStep::Moved { item, position } => view.set_position(item, position),
            }
        } else if let Some((item, frame)) = self.resize.pointer_move(screen, &viewport) {
            view.set_position(item, frame.position);
            view.set_dimensions(item, frame.dimensions);
            events.push(EngineEvent::Resize {
                item,
                dimensions: frame.dimensions,
            });
        }
    }

    // ─── Pointer up ──────────────────────────────────────────────────────

    fn pointer_up<S, V>(
        &mut self,
        screen: Point,
        store: &mut S,
        view: &mut V,
        events: &mut Events,
    ) where
        S: ItemStore + ?Sized,
        V: ViewLayer + ?Sized,
    {
        // A release away from the last move counts as one more move.
        if let Some(last) = self.last_pointer.take()
            && last != screen
        {
            self.pointer_move(screen, store, view, events);
            self.last_pointer = None;
        }

        if let Some(release) = self.drag.release() {
            match release {
                DragRelease::Click {
                    handle,
                    down,
                    modifiers,
                } => {
                    let item = handle.item();
                    self.registry.release(handle);
                    events.push(EngineEvent::Click {
                        item,
                        x: down.x,
                        y: down.y,
                        modifiers,
                    });
                }
                DragRelease::Drop {
                    handle,
                    position,
                    original,
                } => {
                    let item = handle.item();
                    let request = CommitRequest {
                        session: handle.id(),
                        item,
                        commit: Commit::Move { position, original },
                    };
                    self.registry.release(handle);
                    if let Some(CommitOutcome::Written { position, .. }) =
                        self.commit_if_present(store, view, &request)
                    {
                        events.push(EngineEvent::DragEnd { item, position });
                    }
                }
            }
        } else if let Some(release) = self.resize.release() {
            let item = release.handle.item();
            let request = CommitRequest {
                session: release.handle.id(),
                item,
                commit: Commit::Resize {
                    position: release.last.position,
                    dimensions: release.last.dimensions,
                    original_position: release.session.original_position,
                    original_dimensions: release.session.original_dimensions,
                },
            };
            self.registry.release(release.handle);
            if let Some(CommitOutcome::Written {
                dimensions: Some(dimensions),
                ..
            }) = self.commit_if_present(store, view, &request)
            {
                events.push(EngineEvent::ResizeEnd { item, dimensions });
            }
        }
    }

    /// Commit unless the item or canvas vanished mid-session, in which
    /// case nothing is written and no end callback fires.
    fn commit_if_present<S, V>(
        &mut self,
        store: &mut S,
        view: &mut V,
        request: &CommitRequest,
    ) -> Option<CommitOutcome>
    where
        S: ItemStore + ?Sized,
        V: ViewLayer + ?Sized,
    {
        let item = request.item;
        if !view.is_mounted(item) || view.canvas_origin().is_none() || store.item(item).is_none() {
            log::debug!("{item:?} or its canvas is gone, discarding session");
            clear_session_styling(view, item);
            return None;
        }
        Some(self.gateway.commit(store, view, request))
    }

    // ─── Cancel & abort ──────────────────────────────────────────────────

    /// Revert the view to the session's originals without touching the store.
    fn cancel<V>(&mut self, view: &mut V, events: &mut Events)
    where
        V: ViewLayer + ?Sized,
    {
        self.last_pointer = None;
        if let Some(abort) = self.drag.abort() {
            let item = abort.handle.item();
            self.registry.release(abort.handle);
            if abort.was_dragging {
                view.set_position(item, abort.original);
                clear_session_styling(view, item);
                events.push(EngineEvent::Cancelled {
                    item,
                    kind: SessionKind::Drag,
                });
            }
        } else if let Some(release) = self.resize.release() {
            let item = release.handle.item();
            self.registry.release(release.handle);
            view.set_position(item, release.session.original_position);
            view.set_dimensions(item, release.session.original_dimensions);
            clear_session_styling(view, item);
            events.push(EngineEvent::Cancelled {
                item,
                kind: SessionKind::Resize,
            });
        }
    }

    /// End any session silently: no commit, no callbacks.
    fn abort<V>(&mut self, view: &mut V)
    where
        V: ViewLayer + ?Sized,
    {
        self.last_pointer = None;
        if let Some(abort) = self.drag.abort() {
            let item = abort.handle.item();
            self.registry.release(abort.handle);
            clear_session_styling(view, item);
        } else if let Some(release) = self.resize.release() {
            let item = release.handle.item();
            self.registry.release(release.handle);
            clear_session_styling(view, item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use crate::view::ViewState;
    use grip_core::{CanvasTransform, Dimensions, Position, Size};
    use pretty_assertions::assert_eq;

    fn setup(name: &str) -> (InteractionEngine, ItemId, MemoryStore, ViewState) {
        let id = ItemId::intern(name);
        let store = MemoryStore::from_items([Item::new(
            id,
            "note",
            Position::new(0.0, 0.0),
            Dimensions::px(200.0, 100.0),
        )]);
        let mut view = ViewState::new(Point::ZERO, CanvasTransform::IDENTITY);
        view.mount(id, Some(Size::new(200.0, 100.0)));
        (InteractionEngine::default(), id, store, view)
    }

    #[test]
    fn listeners_only_during_session() {
        let (mut engine, id, mut store, mut view) = setup("eng_listen");
        assert!(!engine.wants_window_events());
        engine.handle(
            &InputEvent::pointer_down(id, PointerTarget::DragHandle, 10.0, 10.0),
            &mut store,
            &mut view,
        );
        assert!(engine.wants_window_events());
        engine.handle(&InputEvent::pointer_up(10.0, 10.0), &mut store, &mut view);
        assert!(!engine.wants_window_events());
    }

    #[test]
    fn body_and_controls_start_nothing() {
        let (mut engine, id, mut store, mut view) = setup("eng_body");
        for target in [PointerTarget::Body, PointerTarget::Control] {
            let events = engine.handle(
                &InputEvent::pointer_down(id, target, 10.0, 10.0),
                &mut store,
                &mut view,
            );
            assert!(events.is_empty());
            assert!(!engine.wants_window_events());
        }
    }

    #[test]
    fn non_resizable_items_ignore_handles() {
        let (mut engine, id, mut store, mut view) = setup("eng_fixed");
        engine
            .set_item_props(
                id,
                ItemProps {
                    resizable: false,
                    limits: None,
                },
            )
            .unwrap();
        let events = engine.handle(
            &InputEvent::pointer_down(
                id,
                PointerTarget::ResizeHandle(HandlePosition::BottomRight),
                200.0,
                100.0,
            ),
            &mut store,
            &mut view,
        );
        assert!(events.is_empty());
        assert!(!engine.wants_window_events());
    }

    #[test]
    fn limits_resolve_item_then_kind_then_default() {
        let mut config = GripConfig::default();
        config
            .kind_limits
            .insert("embed".into(), SizeLimits::new(240.0, 135.0));
        let mut engine = InteractionEngine::new(config);

        let note = Item::new(
            ItemId::intern("lim_note"),
            "note",
            Position::default(),
            Dimensions::auto(),
        );
        let embed = Item::new(
            ItemId::intern("lim_embed"),
            "embed",
            Position::default(),
            Dimensions::auto(),
        );
        assert_eq!(engine.limits_for(&note), SizeLimits::DEFAULT);
        assert_eq!(engine.limits_for(&embed), SizeLimits::new(240.0, 135.0));

        engine
            .set_item_props(
                embed.id,
                ItemProps {
                    resizable: true,
                    limits: Some(SizeLimits::new(10.0, 10.0)),
                },
            )
            .unwrap();
        assert_eq!(engine.limits_for(&embed), SizeLimits::new(10.0, 10.0));
    }

    #[test]
    fn geometry_hit_test_uses_config_zone_and_props() {
        let (mut engine, id, store, view) = setup("eng_hit");
        let item = store.get(id).unwrap().clone();
        // Item covers screen (0, 0)-(200, 100); zone 8 reaches 4 px outside.
        assert_eq!(
            engine.hit_test(&item, &view, None, Point::new(203.0, 103.0)),
            Some(PointerTarget::ResizeHandle(HandlePosition::BottomRight))
        );
        assert_eq!(
            engine.hit_test(&item, &view, None, Point::new(100.0, 50.0)),
            Some(PointerTarget::DragHandle)
        );
        assert_eq!(engine.hit_test(&item, &view, None, Point::new(300.0, 50.0)), None);

        engine
            .set_item_props(
                id,
                ItemProps {
                    resizable: false,
                    limits: None,
                },
            )
            .unwrap();
        assert_eq!(
            engine.hit_test(&item, &view, None, Point::new(199.0, 99.0)),
            Some(PointerTarget::DragHandle)
        );
    }

    #[test]
    fn double_click_passes_through_when_idle() {
        let (mut engine, id, mut store, mut view) = setup("eng_dbl");
        let events = engine.handle(
            &InputEvent::DoubleClick {
                item: id,
                x: 4.0,
                y: 5.0,
                modifiers: Modifiers::NONE,
            },
            &mut store,
            &mut view,
        );
        assert_eq!(
            events.into_vec(),
            vec![EngineEvent::DoubleClick {
                item: id,
                x: 4.0,
                y: 5.0,
                modifiers: Modifiers::NONE,
            }]
        );
    }
}
