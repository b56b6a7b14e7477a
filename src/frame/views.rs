//! Typed views over the parts of a frame the encoders read.
//!
//! Each accessor names its field and its default once; encoders never touch
//! raw JSON keys.

use serde_json::Value;

use super::node::Node;

/// One game frame.
#[derive(Clone, Copy, Debug)]
pub struct FrameView<'a> {
    root: Node<'a>,
    game: Node<'a>,
}

impl<'a> FrameView<'a> {
    /// Wrap a raw frame. A frame without a `game_state` object is read as
    /// the game state itself.
    #[must_use]
    pub fn new(value: &'a Value) -> Self {
        let root = Node::new(value);
        let wrapped = root.get("game_state");
        let game = if wrapped.is_object() { wrapped } else { root };
        Self { root, game }
    }

    /// The game-state object.
    #[must_use]
    pub fn game(&self) -> Node<'a> {
        self.game
    }

    /// The combat sub-object, when the frame carries one.
    #[must_use]
    pub fn combat(&self) -> Option<CombatView<'a>> {
        let node = self.game.get("combat_state");
        node.is_object().then_some(CombatView(node))
    }

    pub fn available_commands(&self) -> impl Iterator<Item = &'a str> {
        let commands = self.root.get("available_commands");
        let commands = if commands.is_present() {
            commands
        } else {
            self.game.get("available_commands")
        };
        commands.items().filter_map(Node::as_str)
    }

    #[must_use]
    pub fn current_hp(&self) -> f32 {
        self.game.get("current_hp").f32_or(0.0)
    }

    #[must_use]
    pub fn max_hp(&self) -> f32 {
        self.game.get("max_hp").f32_or(0.0)
    }

    #[must_use]
    pub fn gold(&self) -> f32 {
        self.game.get("gold").f32_or(0.0)
    }

    #[must_use]
    pub fn floor(&self) -> f32 {
        self.game.get("floor").f32_or(0.0)
    }

    #[must_use]
    pub fn act(&self) -> f32 {
        self.game.get("act").f32_or(0.0)
    }

    #[must_use]
    pub fn ascension(&self) -> f32 {
        self.game.get("ascension_level").f32_or(0.0)
    }

    #[must_use]
    pub fn class(&self) -> &'a str {
        self.game.get("class").str_or("")
    }

    #[must_use]
    pub fn room_phase(&self) -> &'a str {
        self.game.get("room_phase").str_or("")
    }

    #[must_use]
    pub fn screen_type(&self) -> &'a str {
        self.game.get("screen_type").str_or("")
    }

    #[must_use]
    pub fn room_type(&self) -> &'a str {
        self.game.get("room_type").str_or("")
    }

    /// Whether the run holds the named act-4 key (`ruby`, `emerald`,
    /// `sapphire`). Reads `keys.<name>` or a `has_<name>_key` flag.
    #[must_use]
    pub fn has_key(&self, name: &str) -> bool {
        let keys = self.game.get("keys");
        if keys.get(name).is_present() {
            return keys.get(name).bool_or(false);
        }
        self.game.get(&format!("has_{name}_key")).bool_or(false)
    }

    pub fn relics(&self) -> impl Iterator<Item = RelicView<'a>> + Clone {
        self.game.get("relics").items().map(RelicView)
    }

    pub fn potions(&self) -> impl Iterator<Item = PotionView<'a>> + Clone {
        self.game.get("potions").items().map(PotionView)
    }

    pub fn deck(&self) -> impl Iterator<Item = CardView<'a>> + Clone {
        self.game.get("deck").items().map(CardView)
    }

    pub fn map(&self) -> impl Iterator<Item = MapNodeView<'a>> + Clone {
        self.game.get("map").items().map(MapNodeView)
    }

    #[must_use]
    pub fn screen(&self) -> ScreenView<'a> {
        ScreenView(self.game.get("screen_state"))
    }
}

/// `game_state.combat_state`.
#[derive(Clone, Copy, Debug)]
pub struct CombatView<'a>(Node<'a>);

impl<'a> CombatView<'a> {
    #[must_use]
    pub fn player(&self) -> PlayerView<'a> {
        PlayerView(self.0.get("player"))
    }

    pub fn hand(&self) -> impl Iterator<Item = CardView<'a>> + Clone {
        self.0.get("hand").items().map(CardView)
    }

    pub fn draw_pile(&self) -> impl Iterator<Item = CardView<'a>> + Clone {
        self.0.get("draw_pile").items().map(CardView)
    }

    pub fn discard_pile(&self) -> impl Iterator<Item = CardView<'a>> + Clone {
        self.0.get("discard_pile").items().map(CardView)
    }

    pub fn exhaust_pile(&self) -> impl Iterator<Item = CardView<'a>> + Clone {
        self.0.get("exhaust_pile").items().map(CardView)
    }

    pub fn limbo(&self) -> impl Iterator<Item = CardView<'a>> + Clone {
        self.0.get("limbo").items().map(CardView)
    }

    #[must_use]
    pub fn card_in_play(&self) -> Option<CardView<'a>> {
        let node = self.0.get("card_in_play");
        node.is_object().then_some(CardView(node))
    }

    pub fn monsters(&self) -> impl Iterator<Item = MonsterView<'a>> + Clone {
        self.0.get("monsters").items().map(MonsterView)
    }

    #[must_use]
    pub fn hand_count(&self) -> usize {
        self.0.get("hand").count()
    }

    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.0.get("draw_pile").count()
    }

    #[must_use]
    pub fn discard_count(&self) -> usize {
        self.0.get("discard_pile").count()
    }

    #[must_use]
    pub fn exhaust_count(&self) -> usize {
        self.0.get("exhaust_pile").count()
    }

    #[must_use]
    pub fn turn(&self) -> f32 {
        self.0.get("turn").f32_or(0.0)
    }

    #[must_use]
    pub fn cards_discarded_this_turn(&self) -> f32 {
        self.0.get("cards_discarded_this_turn").f32_or(0.0)
    }

    #[must_use]
    pub fn times_damaged(&self) -> f32 {
        self.0.get("times_damaged").f32_or(0.0)
    }
}

/// `combat_state.player`.
#[derive(Clone, Copy, Debug)]
pub struct PlayerView<'a>(Node<'a>);

impl<'a> PlayerView<'a> {
    #[must_use]
    pub fn current_hp(&self) -> Option<f32> {
        self.0.get("current_hp").as_f64().map(|v| v as f32)
    }

    #[must_use]
    pub fn max_hp(&self) -> Option<f32> {
        self.0.get("max_hp").as_f64().map(|v| v as f32)
    }

    #[must_use]
    pub fn block(&self) -> f32 {
        self.0.get("block").f32_or(0.0)
    }

    #[must_use]
    pub fn energy(&self) -> f32 {
        self.0.get("energy").f32_or(0.0)
    }

    #[must_use]
    pub fn max_energy(&self) -> f32 {
        self.0.get("max_energy").f32_or(0.0)
    }

    pub fn powers(&self) -> impl Iterator<Item = PowerView<'a>> + Clone {
        self.0.get("powers").items().map(PowerView)
    }
}

/// A card in any pile, the deck or limbo.
#[derive(Clone, Copy, Debug)]
pub struct CardView<'a>(Node<'a>);

impl<'a> CardView<'a> {
    #[must_use]
    pub fn id(&self) -> &'a str {
        self.0.ident()
    }

    /// Energy cost; `-1` marks an X-cost card, `-2` an unplayable one.
    #[must_use]
    pub fn cost(&self) -> i64 {
        self.0.get("cost").i64_or(0)
    }

    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.0.get("is_playable").bool_or(false)
    }

    #[must_use]
    pub fn has_target(&self) -> bool {
        self.0.get("has_target").bool_or(false)
    }

    #[must_use]
    pub fn ethereal(&self) -> bool {
        self.0.get("ethereal").bool_or(false)
    }

    #[must_use]
    pub fn exhausts(&self) -> bool {
        self.0.get("exhausts").bool_or(false)
    }

    #[must_use]
    pub fn upgrades(&self) -> i64 {
        self.0.get("upgrades").i64_or(0)
    }

    /// `ATTACK`, `SKILL`, ...; empty when absent.
    #[must_use]
    pub fn card_type(&self) -> &'a str {
        self.0.get("type").str_or("")
    }

    #[must_use]
    pub fn rarity(&self) -> &'a str {
        self.0.get("rarity").str_or("")
    }
}

/// One monster in `combat_state.monsters`.
#[derive(Clone, Copy, Debug)]
pub struct MonsterView<'a>(Node<'a>);

impl<'a> MonsterView<'a> {
    #[must_use]
    pub fn id(&self) -> &'a str {
        self.0.ident()
    }

    #[must_use]
    pub fn current_hp(&self) -> f32 {
        self.0.get("current_hp").f32_or(0.0)
    }

    #[must_use]
    pub fn max_hp(&self) -> f32 {
        self.0.get("max_hp").f32_or(0.0)
    }

    #[must_use]
    pub fn block(&self) -> f32 {
        self.0.get("block").f32_or(0.0)
    }

    #[must_use]
    pub fn intent(&self) -> &'a str {
        self.0.get("intent").str_or("")
    }

    #[must_use]
    pub fn move_id(&self) -> f32 {
        self.0.get("move_id").f32_or(0.0)
    }

    #[must_use]
    pub fn last_move_id(&self) -> f32 {
        self.0.get("last_move_id").f32_or(0.0)
    }

    #[must_use]
    pub fn second_last_move_id(&self) -> f32 {
        self.0.get("second_last_move_id").f32_or(0.0)
    }

    #[must_use]
    pub fn adjusted_damage(&self) -> f32 {
        self.0.get("move_adjusted_damage").f32_or(0.0)
    }

    #[must_use]
    pub fn hits(&self) -> f32 {
        self.0.get("move_hits").f32_or(0.0)
    }

    #[must_use]
    pub fn is_gone(&self) -> bool {
        self.0.get("is_gone").bool_or(false)
    }

    #[must_use]
    pub fn half_dead(&self) -> bool {
        self.0.get("half_dead").bool_or(false)
    }

    /// Explicit boss flag, when the source sets one.
    #[must_use]
    pub fn boss_flag(&self) -> Option<bool> {
        self.0.get("is_boss").as_bool()
    }

    #[must_use]
    pub fn elite_flag(&self) -> Option<bool> {
        self.0.get("is_elite").as_bool()
    }

    /// Free-form classification tag (`type`).
    #[must_use]
    pub fn type_tag(&self) -> Option<&'a str> {
        self.0.get("type").as_str()
    }

    pub fn powers(&self) -> impl Iterator<Item = PowerView<'a>> + Clone {
        self.0.get("powers").items().map(PowerView)
    }
}

/// A buff or debuff on the player or a monster.
#[derive(Clone, Copy, Debug)]
pub struct PowerView<'a>(Node<'a>);

impl<'a> PowerView<'a> {
    #[must_use]
    pub fn id(&self) -> &'a str {
        self.0.ident()
    }

    #[must_use]
    pub fn amount(&self) -> f32 {
        self.0.get("amount").f32_or(0.0)
    }
}

/// A potion belt entry. Empty slots carry the id `Potion Slot`.
#[derive(Clone, Copy, Debug)]
pub struct PotionView<'a>(Node<'a>);

impl<'a> PotionView<'a> {
    #[must_use]
    pub fn id(&self) -> &'a str {
        self.0.ident()
    }

    #[must_use]
    pub fn can_use(&self) -> bool {
        self.0.get("can_use").bool_or(false)
    }

    #[must_use]
    pub fn can_discard(&self) -> bool {
        self.0.get("can_discard").bool_or(false)
    }

    #[must_use]
    pub fn requires_target(&self) -> bool {
        self.0.get("requires_target").bool_or(false)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct RelicView<'a>(Node<'a>);

impl<'a> RelicView<'a> {
    #[must_use]
    pub fn id(&self) -> &'a str {
        self.0.ident()
    }

    /// Relic counter, `-1` when the relic has none.
    #[must_use]
    pub fn counter(&self) -> i64 {
        self.0.get("counter").i64_or(-1)
    }
}

/// `game_state.screen_state`; its shape depends on the screen type.
#[derive(Clone, Copy, Debug)]
pub struct ScreenView<'a>(Node<'a>);

impl<'a> ScreenView<'a> {
    #[must_use]
    pub fn purge_available(&self) -> bool {
        self.0.get("purge_available").bool_or(false)
    }

    #[must_use]
    pub fn purge_cost(&self) -> f32 {
        self.0.get("purge_cost").f32_or(0.0)
    }

    pub fn rewards(&self) -> impl Iterator<Item = RewardView<'a>> + Clone {
        self.0.get("rewards").items().map(RewardView)
    }

    #[must_use]
    pub fn current_node(&self) -> Option<MapNodeView<'a>> {
        let node = self.0.get("current_node");
        node.is_object().then_some(MapNodeView(node))
    }

    pub fn next_nodes(&self) -> impl Iterator<Item = MapNodeView<'a>> + Clone {
        self.0.get("next_nodes").items().map(MapNodeView)
    }

    #[must_use]
    pub fn boss_available(&self) -> bool {
        self.0.get("boss_available").bool_or(false)
    }

    #[must_use]
    pub fn event_id(&self) -> &'a str {
        self.0.get_any(&["event_id", "event_name"]).str_or("")
    }
}

/// A node of `game_state.map` or of the map screen.
#[derive(Clone, Copy, Debug)]
pub struct MapNodeView<'a>(Node<'a>);

impl<'a> MapNodeView<'a> {
    #[must_use]
    pub fn x(&self) -> f32 {
        self.0.get("x").f32_or(0.0)
    }

    #[must_use]
    pub fn y(&self) -> f32 {
        self.0.get("y").f32_or(0.0)
    }

    #[must_use]
    pub fn symbol(&self) -> &'a str {
        self.0.get("symbol").str_or("")
    }

    #[must_use]
    pub fn children(&self) -> usize {
        self.0.get("children").count()
    }

    #[must_use]
    pub fn parents(&self) -> usize {
        self.0.get("parents").count()
    }
}

/// One entry of a combat reward screen.
#[derive(Clone, Copy, Debug)]
pub struct RewardView<'a>(Node<'a>);

impl<'a> RewardView<'a> {
    #[must_use]
    pub fn reward_type(&self) -> &'a str {
        self.0.get_any(&["reward_type", "type"]).str_or("")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrapped_and_wrapped_frames() {
        let wrapped = json!({"game_state": {"gold": 99}, "available_commands": ["play", "end"]});
        let bare = json!({"gold": 99});
        let a = FrameView::new(&wrapped);
        let b = FrameView::new(&bare);
        assert_eq!(a.gold(), 99.0);
        assert_eq!(b.gold(), 99.0);
        assert_eq!(a.available_commands().collect::<Vec<_>>(), vec!["play", "end"]);
        assert_eq!(b.available_commands().count(), 0);
    }

    #[test]
    fn test_combat_presence() {
        let none = json!({"game_state": {}});
        let null = json!({"game_state": {"combat_state": null}});
        let some = json!({"game_state": {"combat_state": {"turn": 2}}});
        assert!(FrameView::new(&none).combat().is_none());
        assert!(FrameView::new(&null).combat().is_none());
        assert_eq!(FrameView::new(&some).combat().map(|c| c.turn()), Some(2.0));
    }

    #[test]
    fn test_keys() {
        let frame = json!({"keys": {"ruby": true}, "has_emerald_key": true});
        let view = FrameView::new(&frame);
        assert!(view.has_key("ruby"));
        assert!(view.has_key("emerald"));
        assert!(!view.has_key("sapphire"));
    }

    #[test]
    fn test_card_defaults() {
        let frame = json!({"deck": [{"name": "Strike_G"}]});
        let view = FrameView::new(&frame);
        let card = view.deck().next().unwrap();
        assert_eq!(card.id(), "Strike_G");
        assert_eq!(card.cost(), 0);
        assert!(!card.is_playable());
        assert_eq!(card.card_type(), "");
    }

    #[test]
    fn test_relic_counter_default() {
        let frame = json!({"relics": [{"id": "Nunchaku", "counter": 4}, "Anchor"]});
        let counters: Vec<_> = FrameView::new(&frame).relics().map(|r| r.counter()).collect();
        assert_eq!(counters, vec![4, -1]);
    }
}
