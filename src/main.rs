fn main() -> anyhow::Result<()> {
    aidetect_lib::run()
}
