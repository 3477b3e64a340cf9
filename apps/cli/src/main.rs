fn main() -> anyhow::Result<()> {
    verse_quiz::run()
}
