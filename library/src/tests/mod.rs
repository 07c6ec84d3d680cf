mod test_scene_to_frame;
