use anyhow::Result;

use petri::PetriApp;

fn main() -> Result<()> {
    env_logger::init();

    PetriApp::new()?.run()
}
