use rand::Rng;
use rand::seq::IndexedRandom;

/// Greeting templates; `{name}` is replaced with the learner's name.
pub const GREETINGS: [&str; 10] = [
    "🚀 Keep pushing your limits, {name}!",
    "💡 Learning never exhausts the mind, {name}.",
    "🌱 Every day is progress — keep going, {name}!",
    "🔥 You’re on fire, {name}!",
    "🎯 One step closer to your goals, {name}!",
    "💪 Knowledge is your superpower, {name}.",
    "📘 Keep exploring new ideas, {name}!",
    "🏆 You’re doing great, {name} — keep it up!",
    "🧠 Sharpen that mind, {name}!",
    "✨ Great things take time, {name}. You're on track!",
];

pub const COURSE_HEADINGS: [&str; 4] = [
    "📚 Your Learning Journey",
    "🧭 Track Your Progress",
    "📝 Your Enrolled Courses",
    "💼 Personalized Study Plan",
];

#[must_use]
pub fn pick_greeting<R: Rng + ?Sized>(name: &str, rng: &mut R) -> String {
    GREETINGS
        .choose(rng)
        .copied()
        .unwrap_or(GREETINGS[0])
        .replace("{name}", name)
}

#[must_use]
pub fn pick_heading<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    COURSE_HEADINGS
        .choose(rng)
        .copied()
        .unwrap_or(COURSE_HEADINGS[0])
}
