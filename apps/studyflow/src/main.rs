fn main() -> anyhow::Result<()> {
    studyflow::run()
}
