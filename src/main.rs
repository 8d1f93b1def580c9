use jobly::App;

fn main() {
    dioxus::logger::initialize_default();
    dioxus::launch(App);
}
