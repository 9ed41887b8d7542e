mod shape_basic;
