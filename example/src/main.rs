fn main() -> Result<(), slidekit_components::slider::SliderError> {
    example::desktop_main()
}
